//! Upload key composition and download target resolution
//!
//! Uploads keep the source file's full extension (`.tar.gz` included);
//! a rename may only change the part before it.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, RenameViolation, Result};
use crate::region::Region;

/// Split a file name into base name and compound extension
///
/// `archive.tar.gz` splits into `archive` and `.tar.gz`. Leading dots belong to
/// the base name (`.bashrc` has no extension) and a name ending in a dot has
/// no extension.
pub fn split_file_name(name: &str) -> (&str, &str) {
    if name.ends_with('.') {
        return (name, "");
    }

    let trimmed = name.trim_start_matches('.');
    match trimmed.find('.') {
        Some(pos) => name.split_at(name.len() - trimmed.len() + pos),
        None => (name, ""),
    }
}

/// Check that a rename only replaces the base name
pub fn validate_rename(rename: &str) -> Result<&str> {
    let last = Path::new(rename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(rename);

    let violation = if !split_file_name(last).1.is_empty() {
        Some(RenameViolation::ReplacesExtension)
    } else if rename.contains('/') || rename.contains(std::path::MAIN_SEPARATOR) {
        Some(RenameViolation::EmbedsPath)
    } else {
        None
    };

    match violation {
        Some(violation) => Err(Error::UnsafeRename {
            name: rename.to_string(),
            violation,
        }),
        None => Ok(rename),
    }
}

/// Make a destination prefix end with `/`; empty means the space root
pub fn normalize_destination(destination: &str) -> String {
    if destination.is_empty() || destination.ends_with('/') {
        destination.to_string()
    } else {
        format!("{destination}/")
    }
}

/// Compose the object key for uploading `source`
pub fn upload_key(source: &Path, destination: &str, rename: Option<&str>) -> Result<String> {
    let file_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::InvalidPath(format!("{} has no file name", source.display())))?;

    let (base, extension) = split_file_name(file_name);
    let name = match rename.filter(|r| !r.is_empty()) {
        Some(rename) => validate_rename(rename)?,
        None => base,
    };

    Ok(format!(
        "{}{name}{extension}",
        normalize_destination(destination)
    ))
}

/// Local path an object is downloaded to
///
/// Keys are joined below `destination` component by component. Directory
/// markers and keys that would climb out of `destination` are refused.
pub fn download_target(destination: &Path, key: &str) -> Result<PathBuf> {
    if key.is_empty() {
        return Err(Error::InvalidPath("object key is empty".into()));
    }
    if key.ends_with('/') {
        return Err(Error::InvalidPath(format!(
            "'{key}' is a directory marker, not a file"
        )));
    }

    let mut target = destination.to_path_buf();
    for component in key.split('/').filter(|c| !c.is_empty()) {
        if component == ".." || component == "." {
            return Err(Error::InvalidPath(format!(
                "'{key}' would be written outside {}",
                destination.display()
            )));
        }
        target.push(component);
    }
    Ok(target)
}

/// Transfer direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Upload,
    Download,
}

/// Outcome of a completed transfer
#[derive(Debug, Clone, Serialize)]
pub struct TransferReport {
    pub direction: Direction,
    pub region: Region,
    pub space: String,
    pub key: String,
    pub local_path: PathBuf,
    pub bytes: u64,
    pub elapsed_secs: f64,
}

impl std::fmt::Display for TransferReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.direction {
            Direction::Upload => write!(
                f,
                "Uploaded to {}/{} in {:.4} seconds\n- Destination -> {}",
                self.region, self.space, self.elapsed_secs, self.key
            ),
            Direction::Download => write!(
                f,
                "Downloaded from {}/{} in {:.4} seconds\n- Destination -> {}",
                self.region,
                self.space,
                self.elapsed_secs,
                self.local_path.display()
            ),
        }
    }
}
