//! Local directory backend: serves the remote namespace out of a directory on
//! this host. Useful for development and as a stand-in for a storage server.

use crate::cadapter::client::{
    ClientError, ReadFlags, ReadReply, RemoteClient, RemoteDirEntry, StatInfo, checksum,
};
use async_trait::async_trait;
use bytes::Bytes;
use std::io::SeekFrom;
use std::path::{Component, Path, PathBuf};
use tokio::{
    fs,
    io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt},
};

pub struct LocalFsBackend {
    root: PathBuf,
}

fn map_io(path: &str, e: std::io::Error) -> ClientError {
    if e.kind() == std::io::ErrorKind::NotFound {
        ClientError::NotFound(path.to_string())
    } else {
        ClientError::Io(e)
    }
}

impl LocalFsBackend {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Remote paths are absolute; they are re-rooted under `root` and may not
    /// climb out of it.
    fn path_for(&self, path: &str) -> Result<PathBuf, ClientError> {
        let rel = Path::new(path.trim_start_matches('/'));
        if rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(ClientError::InvalidArgument(format!(
                "path escapes backend root: {path}"
            )));
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait]
impl RemoteClient for LocalFsBackend {
    async fn stat(&self, path: &str) -> Result<StatInfo, ClientError> {
        let local = self.path_for(path)?;
        let meta = fs::metadata(&local).await.map_err(|e| map_io(path, e))?;
        if meta.is_dir() {
            return Err(ClientError::InvalidArgument(format!(
                "{path} is a directory"
            )));
        }
        Ok(StatInfo {
            total_size: meta.len(),
        })
    }

    async fn read_dir(&self, path: &str) -> Result<Vec<RemoteDirEntry>, ClientError> {
        let local = self.path_for(path)?;
        let mut rd = fs::read_dir(&local).await.map_err(|e| map_io(path, e))?;
        let mut out = Vec::new();
        while let Some(entry) = rd.next_entry().await? {
            let is_dir = entry.file_type().await?.is_dir();
            out.push(RemoteDirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir,
            });
        }
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    async fn read(
        &self,
        path: &str,
        offset: u64,
        length: u64,
        flags: ReadFlags,
    ) -> Result<ReadReply, ClientError> {
        let local = self.path_for(path)?;
        let mut f = fs::File::open(&local).await.map_err(|e| map_io(path, e))?;
        f.seek(SeekFrom::Start(offset)).await?;
        let mut buf = Vec::with_capacity(length as usize);
        f.take(length).read_to_end(&mut buf).await?;
        let checksum = flags.contains(ReadFlags::CHECKSUM).then(|| checksum(&buf));
        Ok(ReadReply {
            bytes_read: buf.len() as u64,
            data: Bytes::from(buf),
            checksum,
        })
    }

    async fn write(
        &self,
        path: &str,
        offset: u64,
        data: &[u8],
        append: bool,
    ) -> Result<u64, ClientError> {
        let local = self.path_for(path)?;
        if let Some(dir) = local.parent() {
            fs::create_dir_all(dir).await?;
        }
        let mut f = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&local)
            .await
            .map_err(|e| map_io(path, e))?;
        if append {
            f.seek(SeekFrom::End(0)).await?;
        } else {
            f.seek(SeekFrom::Start(offset)).await?;
        }
        f.write_all(data).await?;
        f.flush().await?;
        Ok(data.len() as u64)
    }
}
