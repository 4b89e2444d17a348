//! spaces-s3: S3 SDK adapter for the spaces client
//!
//! This crate provides the implementation of the ObjectStore trait
//! using the aws-sdk-s3 crate. It is the only crate that directly
//! depends on the AWS SDK.

pub mod client;
mod errors;

pub use client::S3Store;
