//! Spaces and object entries as returned by the storage service

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A bucket visible to the account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceInfo {
    /// Bucket name
    pub name: String,

    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<Timestamp>,
}

impl SpaceInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            creation_date: None,
        }
    }
}

/// Presentation-level kind of an object
///
/// The object store is flat; a "directory" is only a key ending in `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    /// Classify a key by the trailing-slash convention
    pub fn of_key(key: &str) -> Self {
        if key.ends_with('/') {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for one object in a space
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectEntry {
    /// Object key
    pub key: String,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,

    /// ETag, without surrounding quotes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Owner display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,
}

impl ObjectEntry {
    /// Create an entry with only a key
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            last_modified: None,
            etag: None,
            owner: None,
            size_bytes: None,
        }
    }

    pub fn kind(&self) -> EntryKind {
        EntryKind::of_key(&self.key)
    }

    pub fn is_dir(&self) -> bool {
        self.kind() == EntryKind::Directory
    }
}
