//! Stateful client over one storage handle
//!
//! `SpacesClient` remembers the spaces visible to the account, the current
//! space, and the last listing fetched. Listings are fetched lazily and
//! always whole; filtering happens client-side.

use std::path::Path;
use std::time::Instant;

use crate::entry::{ObjectEntry, SpaceInfo};
use crate::error::{Error, Result};
use crate::format;
use crate::listing::{self, ListKind};
use crate::region::Region;
use crate::traits::ObjectStore;
use crate::transfer::{self, Direction, TransferReport};

#[derive(Debug)]
struct Listing {
    space: String,
    entries: Vec<ObjectEntry>,
}

/// Client bound to one region and one storage handle
#[derive(Debug)]
pub struct SpacesClient<S> {
    store: S,
    region: Region,
    spaces: Vec<SpaceInfo>,
    space: Option<String>,
    listing: Option<Listing>,
}

impl<S: ObjectStore> SpacesClient<S> {
    /// Fetch the space list and optionally select a space
    ///
    /// Fails when the service rejects the listing or `space` is unknown, so a
    /// returned client is always usable.
    pub async fn connect(store: S, region: Region, space: Option<&str>) -> Result<Self> {
        let mut client = Self {
            store,
            region,
            spaces: Vec::new(),
            space: None,
            listing: None,
        };

        client.refresh_spaces().await?;
        if space.is_some() {
            client.set_space(space)?;
        }

        Ok(client)
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Currently selected space
    pub fn current_space(&self) -> Option<&str> {
        self.space.as_deref()
    }

    /// Names of the known spaces
    pub fn space_names(&self) -> Vec<String> {
        self.spaces.iter().map(|s| s.name.clone()).collect()
    }

    /// Known spaces as last fetched
    pub fn list_spaces(&self) -> &[SpaceInfo] {
        &self.spaces
    }

    /// Known spaces as a text block
    pub fn list_spaces_text(&self) -> String {
        format::spaces_block(&self.spaces)
    }

    /// Re-fetch the full space list
    ///
    /// A selected space that is no longer listed is deselected, and its
    /// cached listing dropped.
    pub async fn refresh_spaces(&mut self) -> Result<&[SpaceInfo]> {
        self.spaces = self.store.list_buckets().await?;
        tracing::debug!(region = %self.region, count = self.spaces.len(), "refreshed spaces");

        if let Some(space) = self.space.take_if(|s| !self.spaces.iter().any(|i| i.name == *s)) {
            tracing::warn!(space = %space, "selected space no longer exists");
            if self.listing.as_ref().is_some_and(|l| l.space == space) {
                self.listing = None;
            }
        }

        Ok(&self.spaces)
    }

    /// Drop the cached listing; the next listing call fetches again
    pub fn invalidate_listing(&mut self) {
        self.listing = None;
    }

    /// Select a space, or confirm the current one when `name` is `None`
    ///
    /// Does not touch the cached listing; listing operations notice the
    /// switch and re-fetch.
    pub fn set_space(&mut self, name: Option<&str>) -> Result<&str> {
        match name {
            None => {
                if self.space.is_none() {
                    return Err(Error::NoSpaceSelected {
                        available: self.space_names(),
                    });
                }
            }
            Some(name) => {
                if !self.spaces.iter().any(|s| s.name == name) {
                    return Err(Error::InvalidSpaceName {
                        name: name.to_string(),
                        available: self.space_names(),
                    });
                }
                if self.space.as_deref() != Some(name) {
                    tracing::debug!(space = name, "selected space");
                }
                self.space = Some(name.to_string());
            }
        }

        Ok(self.space.as_deref().unwrap_or_default())
    }

    /// Re-fetch the listing of the resolved space
    pub async fn refresh_files(&mut self, space: Option<&str>) -> Result<()> {
        let space = self.set_space(space)?.to_string();
        self.fetch_listing(space).await
    }

    /// Entries of the resolved space under `prefix`, filtered by `kind`
    pub async fn list(
        &mut self,
        kind: ListKind,
        prefix: &str,
        space: Option<&str>,
    ) -> Result<Vec<ObjectEntry>> {
        let entries = self.cached_listing(space).await?;
        Ok(listing::filter_entries(entries, prefix, kind.entry_kind()))
    }

    /// Files and directories under `prefix`
    pub async fn list_all(
        &mut self,
        prefix: &str,
        space: Option<&str>,
    ) -> Result<Vec<ObjectEntry>> {
        self.list(ListKind::All, prefix, space).await
    }

    /// Files under `prefix`
    pub async fn list_files(
        &mut self,
        prefix: &str,
        space: Option<&str>,
    ) -> Result<Vec<ObjectEntry>> {
        self.list(ListKind::Files, prefix, space).await
    }

    /// Directories under `prefix`
    pub async fn list_dirs(
        &mut self,
        prefix: &str,
        space: Option<&str>,
    ) -> Result<Vec<ObjectEntry>> {
        self.list(ListKind::Dirs, prefix, space).await
    }

    /// Same selection as [`Self::list`], rendered as a text block
    pub async fn list_text(
        &mut self,
        kind: ListKind,
        prefix: &str,
        space: Option<&str>,
    ) -> Result<String> {
        let entries = self.list(kind, prefix, space).await?;
        let space = self.current_space().unwrap_or_default();
        Ok(format::entries_block(self.region, space, kind, &entries))
    }

    /// Download `key` to `destination/key`, creating directories as needed
    pub async fn download_file(
        &mut self,
        key: &str,
        destination: &Path,
        space: Option<&str>,
    ) -> Result<TransferReport> {
        let space = self.set_space(space)?.to_string();
        let target = transfer::download_target(destination, key)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let started = Instant::now();
        let bytes = self.store.download_file(&space, key, &target).await?;
        let elapsed = started.elapsed();

        tracing::info!(
            space = %space,
            key,
            path = %target.display(),
            bytes,
            elapsed_ms = elapsed.as_millis() as u64,
            "download complete"
        );

        Ok(TransferReport {
            direction: Direction::Download,
            region: self.region,
            space,
            key: key.to_string(),
            local_path: target,
            bytes,
            elapsed_secs: elapsed.as_secs_f64(),
        })
    }

    /// Upload `source` under `destination`, optionally renamed
    ///
    /// The rename may only replace the base name; the source extension is
    /// always kept.
    pub async fn upload_file(
        &mut self,
        source: &Path,
        destination: &str,
        rename: Option<&str>,
        space: Option<&str>,
    ) -> Result<TransferReport> {
        let space = self.set_space(space)?.to_string();
        let key = transfer::upload_key(source, destination, rename)?;

        let metadata = tokio::fs::metadata(source).await?;
        if !metadata.is_file() {
            return Err(Error::InvalidPath(format!(
                "{} is not a regular file",
                source.display()
            )));
        }

        let started = Instant::now();
        let bytes = self.store.upload_file(source, &space, &key).await?;
        let elapsed = started.elapsed();

        tracing::info!(
            space = %space,
            key = %key,
            path = %source.display(),
            bytes,
            elapsed_ms = elapsed.as_millis() as u64,
            "upload complete"
        );

        // The cached listing no longer matches the space.
        if self.listing.as_ref().is_some_and(|l| l.space == space) {
            self.listing = None;
        }

        Ok(TransferReport {
            direction: Direction::Upload,
            region: self.region,
            space,
            key,
            local_path: source.to_path_buf(),
            bytes,
            elapsed_secs: elapsed.as_secs_f64(),
        })
    }

    async fn cached_listing(&mut self, space: Option<&str>) -> Result<&[ObjectEntry]> {
        let explicit = space.is_some();
        let space = self.set_space(space)?.to_string();

        let stale = match &self.listing {
            Some(listing) => explicit || listing.entries.is_empty() || listing.space != space,
            None => true,
        };
        if stale {
            self.fetch_listing(space).await?;
        }

        Ok(self
            .listing
            .as_ref()
            .map(|l| l.entries.as_slice())
            .unwrap_or_default())
    }

    async fn fetch_listing(&mut self, space: String) -> Result<()> {
        let entries = self.store.list_objects(&space).await?;
        tracing::debug!(space = %space, count = entries.len(), "refreshed listing");
        self.listing = Some(Listing { space, entries });
        Ok(())
    }
}

impl<S> std::fmt::Display for SpacesClient<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Spaces <Client: {}/{}>",
            self.region,
            self.space.as_deref().unwrap_or("(none)")
        )
    }
}
