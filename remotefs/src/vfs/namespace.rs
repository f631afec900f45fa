//! Name-based namespace operations against a single remote namespace rooted
//! at a fixed prefix.

use crate::cadapter::RemoteClient;
use crate::vfs::bounded;
use crate::vfs::config::{AdapterConfig, ListingMode, StatFailurePolicy};
use crate::vfs::error::FsError;
use crate::vfs::handle::OpenFileHandle;
use crate::vfs::ops::NamespaceOps;
use crate::vfs::types::{DirectoryEntry, FileAttributes, FileKind};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

pub struct NamespaceAdapter {
    client: Arc<dyn RemoteClient>,
    config: AdapterConfig,
}

impl NamespaceAdapter {
    pub fn new(client: Arc<dyn RemoteClient>, config: AdapterConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Applies the configured policy after a failed stat of `name`.
    async fn stat_failed(
        &self,
        name: &str,
        err: crate::cadapter::ClientError,
    ) -> Result<FileAttributes, FsError> {
        match self.config.stat_failure {
            StatFailurePolicy::AssumeDirectory => Ok(FileAttributes::directory()),
            StatFailurePolicy::NotFound => Err(err.into()),
            StatFailurePolicy::ConfirmWithListing => {
                let path = self.config.resolve(name);
                match bounded(self.config.call_timeout, self.client.read_dir(path.as_str())).await
                {
                    Ok(_) => Ok(FileAttributes::directory()),
                    Err(list_err) if !err.is_not_found() && !list_err.is_not_found() => {
                        Err(FsError::RemoteUnavailable(err))
                    }
                    Err(_) => Err(FsError::NotFound(path.to_string())),
                }
            }
        }
    }
}

#[async_trait]
impl NamespaceOps for NamespaceAdapter {
    type Handle = OpenFileHandle;

    #[instrument(level = "debug", skip(self))]
    async fn get_attr(&self, name: &str) -> Result<FileAttributes, FsError> {
        if name.is_empty() {
            return Ok(FileAttributes::directory());
        }
        let path = self.config.resolve(name);
        match bounded(self.config.call_timeout, self.client.stat(path.as_str())).await {
            Ok(stat) => Ok(FileAttributes::file(stat.total_size)),
            Err(e) => {
                warn!(%path, policy = ?self.config.stat_failure, "stat failed: {e}");
                self.stat_failed(name, e).await
            }
        }
    }

    #[instrument(level = "debug", skip(self))]
    async fn open_dir(&self, name: &str) -> Result<Vec<DirectoryEntry>, FsError> {
        let path = self.config.resolve(name);
        if !name.is_empty() && self.config.listing == ListingMode::Flat {
            return Err(FsError::NotFound(path.to_string()));
        }
        let entries = bounded(self.config.call_timeout, self.client.read_dir(path.as_str()))
            .await
            .inspect_err(|e| warn!(%path, "listing failed: {e}"))?;
        debug!(%path, count = entries.len(), "listed");
        Ok(entries
            .into_iter()
            .map(|e| DirectoryEntry {
                name: e.name,
                kind: if e.is_dir {
                    FileKind::Directory
                } else {
                    FileKind::File
                },
            })
            .collect())
    }

    /// Never contacts the remote side; a missing file shows up on first I/O.
    async fn open(&self, name: &str, flags: u32) -> Result<OpenFileHandle, FsError> {
        let path = self.config.resolve(name);
        debug!(%path, flags, "open");
        Ok(OpenFileHandle::new(
            path,
            self.client.clone(),
            self.config.call_timeout,
        ))
    }
}
