//! Per-open-file handle: byte-range I/O and attribute refresh for one bound
//! remote path. Sizes are re-fetched on every call, never cached.

use crate::cadapter::{ReadFlags, RemoteClient};
use crate::vfs::bounded;
use crate::vfs::error::FsError;
use crate::vfs::ops::{FileHandleOps, ReadOutcome};
use crate::vfs::types::{FileAttributes, RemotePath};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

pub struct OpenFileHandle {
    path: RemotePath,
    client: Arc<dyn RemoteClient>,
    call_timeout: Option<Duration>,
}

impl OpenFileHandle {
    pub(crate) fn new(
        path: RemotePath,
        client: Arc<dyn RemoteClient>,
        call_timeout: Option<Duration>,
    ) -> Self {
        Self {
            path,
            client,
            call_timeout,
        }
    }

    pub fn path(&self) -> &RemotePath {
        &self.path
    }
}

#[async_trait]
impl FileHandleOps for OpenFileHandle {
    async fn read(&self, offset: u64, len: u32) -> Result<ReadOutcome, FsError> {
        debug!(path = %self.path, offset, len, "read");
        let reply = bounded(
            self.call_timeout,
            self.client
                .read(self.path.as_str(), offset, len as u64, ReadFlags::empty()),
        )
        .await
        .inspect_err(|e| warn!(path = %self.path, offset, "remote read failed: {e}"))?;

        let count = (reply.bytes_read as usize).min(reply.data.len());
        Ok(ReadOutcome {
            count,
            data: reply.data.slice(..count),
        })
    }

    async fn write(&self, offset: u64, data: &[u8]) -> Result<u32, FsError> {
        let written = bounded(
            self.call_timeout,
            self.client.write(self.path.as_str(), offset, data, false),
        )
        .await
        .inspect_err(|e| warn!(path = %self.path, offset, "remote write failed: {e}"))?;
        debug!(path = %self.path, offset, written, "write");
        Ok(written.min(u32::MAX as u64) as u32)
    }

    async fn get_attr(&self) -> Result<FileAttributes, FsError> {
        let stat = bounded(self.call_timeout, self.client.stat(self.path.as_str())).await?;
        Ok(FileAttributes::file(stat.total_size))
    }

    // The remote store has no counterpart for the calls below.

    async fn allocate(&self, _offset: u64, _length: u64, _mode: u32) -> Result<(), FsError> {
        Ok(())
    }

    async fn utimens(
        &self,
        _atime: Option<SystemTime>,
        _mtime: Option<SystemTime>,
    ) -> Result<(), FsError> {
        Ok(())
    }

    async fn truncate(&self, _size: u64) -> Result<(), FsError> {
        Ok(())
    }

    async fn fsync(&self, _datasync: bool) -> Result<(), FsError> {
        Ok(())
    }

    fn release(self) {
        debug!(path = %self.path, "release");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cadapter::memory::MemoryBackend;

    fn handle_on(backend: &Arc<MemoryBackend>, path: &str) -> OpenFileHandle {
        OpenFileHandle::new(
            RemotePath::join(path, ""),
            backend.clone() as Arc<dyn RemoteClient>,
            None,
        )
    }

    #[tokio::test]
    async fn test_write_then_read_roundtrip() {
        let backend = Arc::new(MemoryBackend::new());
        let h = handle_on(&backend, "/cfs0/test/f");
        let payloads: [&[u8]; 3] = [b"", b"x", &[7u8; 4096]];
        for (i, data) in payloads.iter().enumerate() {
            let offset = (i as u64) * 10_000;
            let n = h.write(offset, data).await.unwrap();
            assert_eq!(n as usize, data.len());
            let out = h.read(offset, data.len() as u32).await.unwrap();
            assert_eq!(out.count, data.len());
            assert_eq!(&out.data[..], *data);
        }
        h.release();
    }

    #[tokio::test]
    async fn test_short_read_is_authoritative() {
        let backend = Arc::new(MemoryBackend::new());
        backend.insert_file("/f", b"abc".to_vec()).await;
        let h = handle_on(&backend, "/f");
        let out = h.read(1, 100).await.unwrap();
        assert_eq!(out.count, 2);
        assert_eq!(&out.data[..], b"bc");
    }

    #[tokio::test]
    async fn test_get_attr_refetches_size() {
        let backend = Arc::new(MemoryBackend::new());
        backend.insert_file("/f", b"abc".to_vec()).await;
        let h = handle_on(&backend, "/f");
        assert_eq!(h.get_attr().await.unwrap(), FileAttributes::file(3));
        h.write(3, b"defg").await.unwrap();
        assert_eq!(h.get_attr().await.unwrap().size, 7);
    }

    #[tokio::test]
    async fn test_offline_remote_yields_eio_and_recovers() {
        let backend = Arc::new(MemoryBackend::new());
        backend.insert_file("/f", b"abc".to_vec()).await;
        let h = handle_on(&backend, "/f");

        backend.set_offline(true);
        assert_eq!(h.read(0, 3).await.unwrap_err().errno(), libc::EIO);
        assert_eq!(h.write(0, b"z").await.unwrap_err().errno(), libc::EIO);

        backend.set_offline(false);
        assert_eq!(&h.read(0, 3).await.unwrap().data[..], b"abc");
    }

    #[tokio::test]
    async fn test_write_at_huge_offset_fails_the_call_only() {
        let backend = Arc::new(MemoryBackend::new());
        let h = handle_on(&backend, "/f");
        let err = h.write(i64::MAX as u64 - 16, b"xy").await.unwrap_err();
        assert_eq!(err.errno(), libc::EIO);

        assert_eq!(h.write(0, b"ok").await.unwrap(), 2);
        assert_eq!(h.get_attr().await.unwrap().size, 2);
    }

    #[tokio::test]
    async fn test_missing_file_reports_enoent() {
        let backend = Arc::new(MemoryBackend::new());
        let h = handle_on(&backend, "/nope");
        assert_eq!(h.read(0, 1).await.unwrap_err().errno(), libc::ENOENT);
        assert_eq!(h.get_attr().await.unwrap_err().errno(), libc::ENOENT);
    }

    #[tokio::test]
    async fn test_unsupported_calls_succeed_without_remote() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set_offline(true);
        let h = handle_on(&backend, "/f");
        h.allocate(0, 4096, 0).await.unwrap();
        h.utimens(Some(SystemTime::now()), None).await.unwrap();
        h.truncate(0).await.unwrap();
        h.fsync(true).await.unwrap();
    }
}
