//! ObjectStore trait definition
//!
//! This trait defines the interface to the S3-compatible storage service.
//! It allows the client logic to be decoupled from the specific S3 SDK implementation.

use std::path::Path;

use async_trait::async_trait;

use crate::entry::{ObjectEntry, SpaceInfo};
use crate::error::Result;

/// Trait for S3-compatible storage operations
///
/// This trait is implemented by the S3 adapter and can be mocked for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List every bucket owned by the account
    async fn list_buckets(&self) -> Result<Vec<SpaceInfo>>;

    /// List every object in a bucket, in service order
    async fn list_objects(&self, space: &str) -> Result<Vec<ObjectEntry>>;

    /// Download an object to a local file, returning the bytes written
    async fn download_file(&self, space: &str, key: &str, destination: &Path) -> Result<u64>;

    /// Upload a local file to a key, returning the bytes sent
    async fn upload_file(&self, source: &Path, space: &str, key: &str) -> Result<u64>;
}
