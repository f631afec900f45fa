//! Remote storage client API consumed by the VFS layer.
//!
//! Every backend speaks the same four calls: stat, read_dir, read and write,
//! all addressed by an absolute remote path.

use async_trait::async_trait;
use bitflags::bitflags;
use bytes::Bytes;
use thiserror::Error;

bitflags! {
    /// Flags passed along with a remote read request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ReadFlags: u32 {
        /// Ask the backend to return a checksum of the returned bytes.
        const CHECKSUM = 1;
    }
}

/// Result of a remote stat call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatInfo {
    pub total_size: u64,
}

/// One entry of a remote directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Result of a remote read call.
///
/// `bytes_read` is authoritative: it may be shorter than the requested span,
/// and end of file is not reported separately.
#[derive(Debug, Clone, Default)]
pub struct ReadReply {
    pub bytes_read: u64,
    pub data: Bytes,
    pub checksum: Option<u32>,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("remote path not found: {0}")]
    NotFound(String),

    #[error("remote unavailable: {0}")]
    Unavailable(String),

    #[error("remote call timed out")]
    Timeout,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("backend error: {0}")]
    Backend(String),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        match self {
            ClientError::NotFound(_) => true,
            ClientError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Largest object a backend accepts by default (the S3 single PUT limit).
pub const DEFAULT_MAX_OBJECT_SIZE: u64 = 5 * 1024 * 1024 * 1024;

/// End of a write of `len` bytes at `start`, refused when the resulting
/// object would exceed `max_object_size` or not fit in memory.
pub fn write_end(start: u64, len: usize, max_object_size: u64) -> Result<usize, ClientError> {
    start
        .checked_add(len as u64)
        .filter(|&end| end <= max_object_size)
        .and_then(|end| usize::try_from(end).ok())
        .ok_or_else(|| {
            ClientError::InvalidArgument(format!(
                "write of {len} bytes at offset {start} exceeds object size limit {max_object_size}"
            ))
        })
}

/// Checksum reported alongside read data when `ReadFlags::CHECKSUM` is set:
/// the leading four bytes of the MD5 digest, big endian.
pub fn checksum(data: &[u8]) -> u32 {
    let digest = md5::compute(data);
    u32::from_be_bytes([digest.0[0], digest.0[1], digest.0[2], digest.0[3]])
}

/// Remote storage client shared by the namespace adapter and every open handle.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    async fn stat(&self, path: &str) -> Result<StatInfo, ClientError>;

    async fn read_dir(&self, path: &str) -> Result<Vec<RemoteDirEntry>, ClientError>;

    async fn read(
        &self,
        path: &str,
        offset: u64,
        length: u64,
        flags: ReadFlags,
    ) -> Result<ReadReply, ClientError>;

    /// Write `data` at `offset`, or at the current end when `append` is set.
    /// Returns the number of bytes written.
    async fn write(
        &self,
        path: &str,
        offset: u64,
        data: &[u8],
        append: bool,
    ) -> Result<u64, ClientError>;
}
