//! Construction-time configuration of the namespace adapter.

use crate::vfs::error::FsError;
use crate::vfs::types::RemotePath;
use std::time::Duration;

pub const DEFAULT_PREFIX: &str = "/cfs0/test/";

/// What `get_attr` reports when the remote stat of a non-root name fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum StatFailurePolicy {
    /// Report the entry as a directory.
    #[default]
    AssumeDirectory,
    /// Report a directory only if a listing of the same path succeeds,
    /// not-found otherwise.
    ConfirmWithListing,
    /// Surface the stat failure.
    NotFound,
}

/// Which names `open_dir` will list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ListingMode {
    /// Only the root lists; nested names are not found.
    #[default]
    Flat,
    /// Every name lists its own remote sub-path.
    Recursive,
}

#[derive(Clone, Debug)]
pub struct AdapterConfig {
    prefix: String,
    pub stat_failure: StatFailurePolicy,
    pub listing: ListingMode,
    /// Deadline applied to every remote call; `None` waits indefinitely.
    pub call_timeout: Option<Duration>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            stat_failure: StatFailurePolicy::default(),
            listing: ListingMode::default(),
            call_timeout: None,
        }
    }
}

impl AdapterConfig {
    pub fn new(prefix: impl Into<String>) -> Result<Self, FsError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(FsError::Config("namespace prefix must not be empty".into()));
        }
        Ok(Self {
            prefix,
            ..Self::default()
        })
    }

    pub fn with_stat_failure(mut self, policy: StatFailurePolicy) -> Self {
        self.stat_failure = policy;
        self
    }

    pub fn with_listing(mut self, mode: ListingMode) -> Self {
        self.listing = mode;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn resolve(&self, name: &str) -> RemotePath {
        RemotePath::join(&self.prefix, name)
    }
}
