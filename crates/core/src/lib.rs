//! spaces-core: Core library for the spaces object storage client
//!
//! This crate provides everything the client does on its own side of the wire:
//! - Credential and region resolution
//! - Space selection and the cached object listing
//! - File/directory classification and prefix filtering
//! - Upload key composition and rename validation
//! - Text presentation of listings
//! - ObjectStore trait for the storage service
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! so the client logic can be tested against a mocked store.

pub mod client;
pub mod config;
pub mod entry;
pub mod error;
pub mod format;
pub mod listing;
pub mod region;
pub mod traits;
pub mod transfer;

pub use client::SpacesClient;
pub use config::{Credentials, EnvFile, EnvFileLoader};
pub use entry::{EntryKind, ObjectEntry, SpaceInfo};
pub use error::{Error, RenameViolation, Result};
pub use listing::ListKind;
pub use region::Region;
pub use traits::ObjectStore;
pub use transfer::{Direction, TransferReport};
