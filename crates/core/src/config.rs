//! Configuration management
//!
//! This module handles locating and loading the env file and resolving the
//! key pair used to sign requests. The env file is stored in TOML format,
//! either as ./env.toml or at ~/.config/spaces/env.toml.
//!
//! Example env file:
//!
//! ```toml
//! public_key = "DO00EXAMPLE"
//! secret_key = "secret"
//! region = "nyc3"
//! space = "media"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// File name looked up in the working directory and the config directory
pub const ENV_FILE_NAME: &str = "env.toml";

/// Contents of the env file
///
/// Every field is optional so the same file can carry only defaults, only
/// keys, or both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvFile {
    /// Access key ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,

    /// Secret access key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    /// Default region code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Default space
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<String>,

    /// Custom endpoint URL, overriding the region endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Locates and reads the env file
#[derive(Debug, Clone)]
pub struct EnvFileLoader {
    candidates: Vec<PathBuf>,
}

impl EnvFileLoader {
    /// Look in the working directory, then in the user config directory
    pub fn new() -> Self {
        let mut candidates = vec![PathBuf::from(ENV_FILE_NAME)];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("spaces").join(ENV_FILE_NAME));
        }
        Self { candidates }
    }

    /// Only consider the given path (useful for --env-file and testing)
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            candidates: vec![path.into()],
        }
    }

    /// First candidate that exists on disk
    pub fn locate(&self) -> Option<&Path> {
        self.candidates
            .iter()
            .map(PathBuf::as_path)
            .find(|p| p.is_file())
    }

    /// Load the env file
    ///
    /// Returns `Ok(None)` when no candidate exists. A file that exists but
    /// cannot be parsed is an error.
    pub fn load(&self) -> Result<Option<EnvFile>> {
        let Some(path) = self.locate() else {
            tracing::debug!(candidates = ?self.candidates, "no env file found");
            return Ok(None);
        };

        tracing::debug!(path = %path.display(), "loading env file");
        let content = std::fs::read_to_string(path)?;
        let env: EnvFile = toml::from_str(&content)?;
        Ok(Some(env))
    }
}

impl Default for EnvFileLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Static key pair for the storage service
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub public_key: String,
    pub secret_key: String,
}

impl Credentials {
    pub fn new(public_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Resolve the key pair
    ///
    /// The explicit pair wins when both halves are present. Otherwise both keys
    /// must come from the env file.
    pub fn resolve(
        public_key: Option<&str>,
        secret_key: Option<&str>,
        env: Option<&EnvFile>,
    ) -> Result<Self> {
        if let (Some(public), Some(secret)) = (non_empty(public_key), non_empty(secret_key)) {
            return Ok(Self::new(public, secret));
        }

        let env = env.ok_or_else(|| Error::MissingCredentials("no env file found".into()))?;

        let public = non_empty(env.public_key.as_deref()).ok_or_else(|| {
            Error::MissingCredentials("env file has no 'public_key'".into())
        })?;
        let secret = non_empty(env.secret_key.as_deref()).ok_or_else(|| {
            Error::MissingCredentials("env file has no 'secret_key'".into())
        })?;

        Ok(Self::new(public, secret))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_loader(content: Option<&str>) -> (EnvFileLoader, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(ENV_FILE_NAME);
        if let Some(content) = content {
            std::fs::write(&path, content).unwrap();
        }
        (EnvFileLoader::with_path(path), temp_dir)
    }

    #[test]
    fn test_load_missing_file() {
        let (loader, _temp_dir) = temp_loader(None);
        assert!(loader.locate().is_none());
        assert!(loader.load().unwrap().is_none());
    }

    #[test]
    fn test_load_full_file() {
        let (loader, _temp_dir) = temp_loader(Some(
            r#"
            public_key = "pub"
            secret_key = "sec"
            region = "NYC3"
            space = "media"
            "#,
        ));

        let env = loader.load().unwrap().unwrap();
        assert_eq!(env.public_key.as_deref(), Some("pub"));
        assert_eq!(env.secret_key.as_deref(), Some("sec"));
        assert_eq!(env.region.as_deref(), Some("NYC3"));
        assert_eq!(env.space.as_deref(), Some("media"));
        assert!(env.endpoint.is_none());
    }

    #[test]
    fn test_load_malformed_file() {
        let (loader, _temp_dir) = temp_loader(Some("public_key = "));
        let err = loader.load().unwrap_err();
        assert!(matches!(err, Error::TomlParse(_)));
    }

    #[test]
    fn test_resolve_explicit_wins() {
        let env = EnvFile {
            public_key: Some("file-pub".into()),
            secret_key: Some("file-sec".into()),
            ..Default::default()
        };
        let creds = Credentials::resolve(Some("pub"), Some("sec"), Some(&env)).unwrap();
        assert_eq!(creds, Credentials::new("pub", "sec"));
    }

    #[test]
    fn test_resolve_partial_explicit_falls_back_to_file() {
        let env = EnvFile {
            public_key: Some("file-pub".into()),
            secret_key: Some("file-sec".into()),
            ..Default::default()
        };
        let creds = Credentials::resolve(Some("pub"), None, Some(&env)).unwrap();
        assert_eq!(creds, Credentials::new("file-pub", "file-sec"));
    }

    #[test]
    fn test_resolve_without_file() {
        let err = Credentials::resolve(None, Some("sec"), None).unwrap_err();
        assert!(matches!(err, Error::MissingCredentials(_)));
        assert!(err.to_string().contains("no env file found"));
    }

    #[test]
    fn test_resolve_file_missing_key() {
        let (loader, _temp_dir) = temp_loader(Some(r#"public_key = "pub""#));
        let env = loader.load().unwrap();
        let err = Credentials::resolve(None, None, env.as_ref()).unwrap_err();
        assert!(err.to_string().contains("secret_key"));
    }

    #[test]
    fn test_resolve_empty_values_are_missing() {
        let env = EnvFile {
            public_key: Some("  ".into()),
            secret_key: Some("sec".into()),
            ..Default::default()
        };
        let err = Credentials::resolve(Some(""), Some(""), Some(&env)).unwrap_err();
        assert!(err.to_string().contains("public_key"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("pub", "very-secret");
        let debug = format!("{creds:?}");
        assert!(debug.contains("pub"));
        assert!(!debug.contains("very-secret"));
    }
}
