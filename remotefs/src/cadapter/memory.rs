//! In-process backend: a map of remote path to bytes plus a set of explicit
//! directories. Can be switched offline to behave like an unreachable server.

use crate::cadapter::client::{
    ClientError, DEFAULT_MAX_OBJECT_SIZE, ReadFlags, ReadReply, RemoteClient, RemoteDirEntry,
    StatInfo, checksum, write_end,
};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
struct Namespace {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
}

impl Namespace {
    fn is_dir(&self, path: &str) -> bool {
        if path == "/" || self.dirs.contains(path) {
            return true;
        }
        let prefix = format!("{path}/");
        self.files.keys().any(|k| k.starts_with(&prefix))
            || self.dirs.iter().any(|d| d.starts_with(&prefix))
    }
}

pub struct MemoryBackend {
    ns: RwLock<Namespace>,
    offline: AtomicBool,
    max_object_size: u64,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self {
            ns: RwLock::default(),
            offline: AtomicBool::new(false),
            max_object_size: DEFAULT_MAX_OBJECT_SIZE,
        }
    }
}

/// Trailing separators are dropped so `/a/b/` and `/a/b` address the same node.
fn norm(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes that would grow a file past `limit` bytes are refused.
    pub fn with_max_object_size(mut self, limit: u64) -> Self {
        self.max_object_size = limit;
        self
    }

    pub async fn insert_file(&self, path: &str, data: impl Into<Vec<u8>>) {
        self.ns.write().await.files.insert(norm(path), data.into());
    }

    pub async fn create_dir(&self, path: &str) {
        self.ns.write().await.dirs.insert(norm(path));
    }

    pub async fn contents(&self, path: &str) -> Option<Vec<u8>> {
        self.ns.read().await.files.get(&norm(path)).cloned()
    }

    /// While offline every call fails with `ClientError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), ClientError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(ClientError::Unavailable("memory backend is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteClient for MemoryBackend {
    async fn stat(&self, path: &str) -> Result<StatInfo, ClientError> {
        self.check_online()?;
        let path = norm(path);
        let ns = self.ns.read().await;
        match ns.files.get(&path) {
            Some(data) => Ok(StatInfo {
                total_size: data.len() as u64,
            }),
            None if ns.is_dir(&path) => Err(ClientError::InvalidArgument(format!(
                "{path} is a directory"
            ))),
            None => Err(ClientError::NotFound(path)),
        }
    }

    async fn read_dir(&self, path: &str) -> Result<Vec<RemoteDirEntry>, ClientError> {
        self.check_online()?;
        let path = norm(path);
        let ns = self.ns.read().await;
        if ns.files.contains_key(&path) {
            return Err(ClientError::InvalidArgument(format!(
                "{path} is not a directory"
            )));
        }
        if !ns.is_dir(&path) {
            return Err(ClientError::NotFound(path));
        }
        let prefix = if path == "/" {
            path.clone()
        } else {
            format!("{path}/")
        };

        // name -> is_dir; a file nested deeper implies a directory child
        let mut children: BTreeMap<String, bool> = BTreeMap::new();
        for key in ns.files.keys().chain(ns.dirs.iter()) {
            let Some(rest) = key.strip_prefix(&prefix) else {
                continue;
            };
            if rest.is_empty() {
                continue;
            }
            match rest.split_once('/') {
                Some((dir, _)) => {
                    children.insert(dir.to_string(), true);
                }
                None => {
                    let is_dir = ns.dirs.contains(key);
                    children.entry(rest.to_string()).or_insert(is_dir);
                }
            }
        }
        Ok(children
            .into_iter()
            .map(|(name, is_dir)| RemoteDirEntry { name, is_dir })
            .collect())
    }

    async fn read(
        &self,
        path: &str,
        offset: u64,
        length: u64,
        flags: ReadFlags,
    ) -> Result<ReadReply, ClientError> {
        self.check_online()?;
        let path = norm(path);
        let ns = self.ns.read().await;
        let data = ns
            .files
            .get(&path)
            .ok_or_else(|| ClientError::NotFound(path.clone()))?;
        let start = (offset as usize).min(data.len());
        let end = start.saturating_add(length as usize).min(data.len());
        let out = Bytes::copy_from_slice(&data[start..end]);
        let checksum = flags.contains(ReadFlags::CHECKSUM).then(|| checksum(&out));
        Ok(ReadReply {
            bytes_read: out.len() as u64,
            data: out,
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
        self.check_online()?;
        let path = norm(path);
        let mut ns = self.ns.write().await;
        if ns.is_dir(&path) {
            return Err(ClientError::InvalidArgument(format!(
                "{path} is a directory"
            )));
        }
        let len = ns.files.get(&path).map_or(0, Vec::len) as u64;
        let start = if append { len } else { offset };
        let end = write_end(start, data.len(), self.max_object_size)?;
        let start = end - data.len();
        let file = ns.files.entry(path).or_default();
        if file.len() < end {
            file.resize(end, 0);
        }
        file[start..end].copy_from_slice(data);
        Ok(data.len() as u64)
    }
}
