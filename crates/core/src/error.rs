//! Error types for spaces-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for spaces-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why a rename was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameViolation {
    /// The new name carries its own extension
    ReplacesExtension,
    /// The new name contains a path separator
    EmbedsPath,
}

impl std::fmt::Display for RenameViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReplacesExtension => write!(
                f,
                "the file extension cannot be replaced; rename 'old_name.txt' to 'new_name', not 'new_name.mp4'"
            ),
            Self::EmbedsPath => write!(
                f,
                "a path cannot be placed in the new name; use the destination prefix instead"
            ),
        }
    }
}

/// Error types for spaces-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Keys could not be resolved from arguments or the env file
    #[error(
        "API keys have not been provided: {0}. Pass --public-key/--secret-key or supply an env.toml with public_key and secret_key"
    )]
    MissingCredentials(String),

    /// Region outside the supported set
    #[error("Invalid region '{given}', available options: {}", .valid.join(", "))]
    InvalidRegion {
        given: String,
        valid: Vec<&'static str>,
    },

    /// No current space and none given
    #[error("No space selected. Set a space or pass one explicitly. Available spaces: [{}]", .available.join(", "))]
    NoSpaceSelected { available: Vec<String> },

    /// Space name not known to the account
    #[error("Space '{name}' doesn't exist. Available spaces: [{}]", .available.join(", "))]
    InvalidSpaceName {
        name: String,
        available: Vec<String>,
    },

    /// Rename would change the extension or embed a path
    #[error("Unsafe rename '{name}': {violation}")]
    UnsafeRename {
        name: String,
        violation: RenameViolation,
    },

    /// Invalid local path or object key
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Authentication error
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network or service error
    #[error("Network error: {0}")]
    Network(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_)
            | Error::MissingCredentials(_)
            | Error::InvalidRegion { .. }
            | Error::NoSpaceSelected { .. }
            | Error::UnsafeRename { .. }
            | Error::InvalidPath(_)
            | Error::TomlParse(_)
            | Error::InvalidUrl(_) => 2, // UsageError
            Error::Network(_) => 3,     // NetworkError
            Error::Auth(_) => 4,        // AuthError
            Error::NotFound(_) | Error::InvalidSpaceName { .. } => 5, // NotFound
            _ => 1,                     // GeneralError
        }
    }
}
