//! S3 store implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from spaces-core.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use tokio::io::AsyncWriteExt;
use url::Url;

use spaces_core::{Credentials, Error, ObjectEntry, ObjectStore, Region, Result, SpaceInfo};

use crate::errors::map_sdk_error;

/// S3 store wrapper
pub struct S3Store {
    inner: aws_sdk_s3::Client,
    endpoint: Url,
}

impl S3Store {
    /// Create a store for `region`
    ///
    /// Without `endpoint` the region's Spaces endpoint is used. A custom
    /// endpoint switches to path-style addressing, which every S3-compatible
    /// server understands.
    pub async fn new(
        region: Region,
        credentials: &Credentials,
        endpoint: Option<&str>,
    ) -> Result<Self> {
        let custom_endpoint = endpoint.is_some();
        let endpoint = match endpoint {
            Some(url) => Url::parse(url)?,
            None => region.endpoint()?,
        };

        // Build credentials provider
        let provider = aws_credential_types::Credentials::new(
            credentials.public_key.clone(),
            credentials.secret_key.clone(),
            None, // session token
            None, // expiry
            "spaces-static-credentials",
        );

        // Build SDK config
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(provider)
            .region(aws_config::Region::new(region.as_str()))
            .endpoint_url(endpoint.as_str())
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(custom_endpoint)
            .build();

        tracing::debug!(endpoint = %endpoint, region = %region, "created S3 store");

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            endpoint,
        })
    }

    /// Endpoint requests are sent to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl std::fmt::Debug for S3Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Store")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

fn to_timestamp(dt: &aws_smithy_types::DateTime) -> Option<jiff::Timestamp> {
    jiff::Timestamp::new(dt.secs(), dt.subsec_nanos() as i32).ok()
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_buckets(&self) -> Result<Vec<SpaceInfo>> {
        let response = self
            .inner
            .list_buckets()
            .send()
            .await
            .map_err(|e| map_sdk_error(e, self.endpoint.as_str()))?;

        let spaces = response
            .buckets()
            .iter()
            .filter_map(|b| {
                let name = b.name()?;
                Some(SpaceInfo {
                    name: name.to_string(),
                    creation_date: b.creation_date().and_then(to_timestamp),
                })
            })
            .collect();

        Ok(spaces)
    }

    async fn list_objects(&self, space: &str) -> Result<Vec<ObjectEntry>> {
        let mut entries = Vec::new();
        let mut continuation_token: Option<String> = None;

        // Paginate through all results
        loop {
            let mut request = self.inner.list_objects_v2().bucket(space).fetch_owner(true);
            if let Some(token) = &continuation_token {
                request = request.continuation_token(token);
            }

            let response = request.send().await.map_err(|e| map_sdk_error(e, space))?;

            for object in response.contents() {
                let Some(key) = object.key() else {
                    tracing::warn!(space, "skipping listed object without a key");
                    continue;
                };

                entries.push(ObjectEntry {
                    key: key.to_string(),
                    last_modified: object.last_modified().and_then(to_timestamp),
                    etag: object.e_tag().map(|etag| etag.trim_matches('"').to_string()),
                    owner: object
                        .owner()
                        .and_then(|owner| owner.display_name())
                        .map(str::to_string),
                    size_bytes: object.size(),
                });
            }

            match response.next_continuation_token() {
                Some(token) if response.is_truncated().unwrap_or(false) => {
                    continuation_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        tracing::debug!(space, count = entries.len(), "listed objects");
        Ok(entries)
    }

    async fn download_file(&self, space: &str, key: &str, destination: &Path) -> Result<u64> {
        let resource = format!("{space}/{key}");
        let response = self
            .inner
            .get_object()
            .bucket(space)
            .key(key)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &resource))?;

        let mut body = response.body;
        let mut file = tokio::fs::File::create(destination).await?;
        let mut written = 0u64;

        while let Some(chunk) = body
            .try_next()
            .await
            .map_err(|e| Error::Network(e.to_string()))?
        {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }

    async fn upload_file(&self, source: &Path, space: &str, key: &str) -> Result<u64> {
        let size = tokio::fs::metadata(source).await?.len();
        let body = ByteStream::from_path(source)
            .await
            .map_err(|e| Error::General(format!("Failed to read {}: {e}", source.display())))?;

        let mut request = self
            .inner
            .put_object()
            .bucket(space)
            .key(key)
            .body(body);

        if let Some(mime) = mime_guess::from_path(source).first() {
            request = request.content_type(mime.essence_str());
        }

        request
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &format!("{space}/{key}")))?;

        Ok(size)
    }
}
