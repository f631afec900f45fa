//! Capability sets the transport drives: one for name-based namespace calls,
//! one for per-open-file calls. Operations without a remote counterpart are
//! still spelled out by every implementor.

use crate::vfs::error::FsError;
use crate::vfs::types::{DirectoryEntry, FileAttributes};
use async_trait::async_trait;
use bytes::Bytes;
use std::time::SystemTime;

/// Bytes returned by one read call. `count` is authoritative and may be
/// shorter than requested.
#[derive(Clone, Debug, Default)]
pub struct ReadOutcome {
    pub count: usize,
    pub data: Bytes,
}

#[async_trait]
pub trait NamespaceOps: Send + Sync {
    type Handle: FileHandleOps + 'static;

    /// `name` is relative to the mount root; the empty name is the root.
    async fn get_attr(&self, name: &str) -> Result<FileAttributes, FsError>;

    async fn open_dir(&self, name: &str) -> Result<Vec<DirectoryEntry>, FsError>;

    async fn open(&self, name: &str, flags: u32) -> Result<Self::Handle, FsError>;
}

#[async_trait]
pub trait FileHandleOps: Send + Sync {
    async fn read(&self, offset: u64, len: u32) -> Result<ReadOutcome, FsError>;

    async fn write(&self, offset: u64, data: &[u8]) -> Result<u32, FsError>;

    async fn get_attr(&self) -> Result<FileAttributes, FsError>;

    async fn allocate(&self, offset: u64, length: u64, mode: u32) -> Result<(), FsError>;

    async fn utimens(
        &self,
        atime: Option<SystemTime>,
        mtime: Option<SystemTime>,
    ) -> Result<(), FsError>;

    async fn truncate(&self, size: u64) -> Result<(), FsError>;

    async fn fsync(&self, datasync: bool) -> Result<(), FsError>;

    /// Ends the handle's life; nothing can be called on it afterwards.
    fn release(self)
    where
        Self: Sized;
}
