//! VFS layer (virtual filesystem)
//!
//! Responsibilities:
//! - Translate name-based filesystem calls into remote client calls scoped
//!   under a fixed namespace prefix, and synthesize the root directory.
//! - Hand out per-open-file handles that talk to the remote client directly.
//! - Turn remote failures into call-scoped `FsError`s; nothing here ends the
//!   process.
//!
//! Submodules:
//! - `namespace`: `NamespaceAdapter` (getattr / opendir / open)
//! - `handle`: `OpenFileHandle` (read / write / getattr / no-op calls)
//! - `ops`: capability traits the transport drives
pub mod config;
pub mod error;
pub mod handle;
pub mod namespace;
pub mod ops;
pub mod types;

pub use config::{AdapterConfig, ListingMode, StatFailurePolicy};
pub use error::FsError;
pub use handle::OpenFileHandle;
pub use namespace::NamespaceAdapter;
pub use ops::{FileHandleOps, NamespaceOps, ReadOutcome};
pub use types::{DirectoryEntry, FileAttributes, FileKind, RemotePath};

use crate::cadapter::ClientError;
use std::future::Future;
use std::time::Duration;

/// Await a remote call, failing with `ClientError::Timeout` once `timeout`
/// elapses.
pub(crate) async fn bounded<T, F>(timeout: Option<Duration>, call: F) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| ClientError::Timeout)?,
        None => call.await,
    }
}
