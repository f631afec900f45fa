//! FUSE adapter and request handling
//!
//! Implements `rfuse3::raw::Filesystem` for `RemoteFs`, translating the
//! kernel's inode-addressed requests into the name-based calls of a
//! `NamespaceOps` implementation.
//!
//! Main components:
//! - `inode`: bijection between relative names and inode numbers
//! - `handles`: table of open file handles keyed by FUSE fh
//! - `mount`: mounting helpers over rfuse3 sessions
//!
//! Every error returned by the namespace or a handle is converted into an
//! errno for the one request that caused it; the session keeps serving.
pub mod handles;
pub mod inode;
pub mod mount;

use crate::util::open_options::OpenOptions;
use crate::vfs::{FileAttributes, FileHandleOps, FileKind, FsError, NamespaceOps};
use futures_util::stream::{self, Stream};
use handles::HandleTable;
use inode::{InodeTable, ROOT_INO, UNKNOWN_INO, child_name, parent_name};
use rfuse3::raw::Filesystem;
use rfuse3::raw::Request;
use rfuse3::raw::reply::{
    DirectoryEntry, DirectoryEntryPlus, FileAttr, ReplyAttr, ReplyData, ReplyDirectory,
    ReplyDirectoryPlus, ReplyEntry, ReplyInit, ReplyOpen, ReplyStatFs, ReplyWrite,
};
use rfuse3::{Errno, FileType as FuseFileType, Result as FuseResult, SetAttr, Timestamp};
use std::ffi::{OsStr, OsString};
use std::num::NonZeroU32;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

impl From<FsError> for Errno {
    fn from(e: FsError) -> Self {
        Errno::from(e.errno())
    }
}

/// Transport-facing options of a mounted namespace.
#[derive(Clone, Copy, Debug)]
pub struct FsOptions {
    /// How long the kernel may cache attributes and entries.
    pub attr_ttl: Duration,
    /// Let the kernel page-cache file data instead of using direct I/O.
    pub kernel_cache: bool,
}

impl Default for FsOptions {
    fn default() -> Self {
        Self {
            attr_ttl: Duration::ZERO,
            kernel_cache: false,
        }
    }
}

pub struct RemoteFs<N: NamespaceOps> {
    ns: N,
    inodes: InodeTable,
    handles: HandleTable<N::Handle>,
    options: FsOptions,
}

impl<N: NamespaceOps> RemoteFs<N> {
    pub fn new(ns: N, options: FsOptions) -> Self {
        Self {
            ns,
            inodes: InodeTable::new(),
            handles: HandleTable::new(),
            options,
        }
    }

    pub fn namespace(&self) -> &N {
        &self.ns
    }

    fn name_of(&self, ino: u64) -> Result<String, Errno> {
        self.inodes.name_of(ino).ok_or_else(|| libc::ENOENT.into())
    }

    fn handle(&self, fh: u64) -> Result<Arc<N::Handle>, Errno> {
        self.handles
            .get(fh)
            .ok_or_else(|| FsError::BadHandle(fh).into())
    }

    /// Attributes of `ino`, through its open handle when the kernel names one.
    async fn attr_of(&self, ino: u64, fh: Option<u64>) -> Result<FileAttributes, Errno> {
        if let Some(handle) = fh.and_then(|fh| self.handles.get(fh)) {
            return Ok(handle.get_attr().await?);
        }
        let name = self.name_of(ino)?;
        Ok(self.ns.get_attr(&name).await?)
    }

    async fn list(&self, ino: u64) -> Result<(String, Vec<crate::vfs::DirectoryEntry>), Errno> {
        let name = self.name_of(ino)?;
        let entries = self.ns.open_dir(&name).await?;
        Ok((name, entries))
    }
}

impl<N> Filesystem for RemoteFs<N>
where
    N: NamespaceOps + 'static,
{
    type DirEntryStream<'a>
        = Pin<Box<dyn Stream<Item = FuseResult<DirectoryEntry>> + Send + 'a>>
    where
        Self: 'a;

    type DirEntryPlusStream<'a>
        = Pin<Box<dyn Stream<Item = FuseResult<DirectoryEntryPlus>> + Send + 'a>>
    where
        Self: 'a;

    async fn init(&self, _req: Request) -> FuseResult<ReplyInit> {
        let max_write = NonZeroU32::new(1024 * 1024).unwrap_or(NonZeroU32::MIN);
        info!("remotefs session initialized");
        Ok(ReplyInit { max_write })
    }

    async fn destroy(&self, _req: Request) {
        info!(open_handles = self.handles.len(), "remotefs session destroyed");
    }

    async fn lookup(&self, req: Request, parent: u64, name: &OsStr) -> FuseResult<ReplyEntry> {
        let parent = self.name_of(parent)?;
        let child = child_name(&parent, &name.to_string_lossy());
        let attr = self.ns.get_attr(&child).await?;
        let ino = self.inodes.lookup(&child);
        Ok(ReplyEntry {
            ttl: self.options.attr_ttl,
            attr: to_fuse_attr(ino, &attr, &req),
            generation: 0,
        })
    }

    async fn forget(&self, _req: Request, inode: u64, nlookup: u64) {
        self.inodes.forget(inode, nlookup);
    }

    async fn batch_forget(&self, _req: Request, inodes: &[(u64, u64)]) {
        for &(inode, nlookup) in inodes {
            self.inodes.forget(inode, nlookup);
        }
    }

    async fn getattr(
        &self,
        req: Request,
        ino: u64,
        fh: Option<u64>,
        _flags: u32,
    ) -> FuseResult<ReplyAttr> {
        let attr = self.attr_of(ino, fh).await?;
        Ok(ReplyAttr {
            ttl: self.options.attr_ttl,
            attr: to_fuse_attr(ino, &attr, &req),
        })
    }

    // size -> truncate, atime/mtime -> utimens; other fields are ignored
    async fn setattr(
        &self,
        req: Request,
        ino: u64,
        fh: Option<u64>,
        set_attr: SetAttr,
    ) -> FuseResult<ReplyAttr> {
        let touches_file =
            set_attr.size.is_some() || set_attr.atime.is_some() || set_attr.mtime.is_some();
        if touches_file && ino != ROOT_INO {
            let handle = match fh.and_then(|fh| self.handles.get(fh)) {
                Some(h) => h,
                None => {
                    let name = self.name_of(ino)?;
                    Arc::new(self.ns.open(&name, libc::O_WRONLY as u32).await?)
                }
            };
            if let Some(size) = set_attr.size {
                handle.truncate(size).await?;
            }
            if set_attr.atime.is_some() || set_attr.mtime.is_some() {
                handle
                    .utimens(
                        set_attr.atime.map(to_system_time),
                        set_attr.mtime.map(to_system_time),
                    )
                    .await?;
            }
            // a transient handle opened above is released here
            if let Ok(handle) = Arc::try_unwrap(handle) {
                handle.release();
            }
        }
        let attr = self.attr_of(ino, fh).await?;
        Ok(ReplyAttr {
            ttl: self.options.attr_ttl,
            attr: to_fuse_attr(ino, &attr, &req),
        })
    }

    async fn open(&self, _req: Request, ino: u64, flags: u32) -> FuseResult<ReplyOpen> {
        let name = self.name_of(ino)?;
        let handle = self.ns.open(&name, flags).await?;
        let fh = self.handles.insert(handle);
        debug!(ino, fh, %name, "opened");
        Ok(ReplyOpen {
            fh,
            flags: OpenOptions::for_open(self.options.kernel_cache).bits(),
        })
    }

    async fn read(
        &self,
        _req: Request,
        _ino: u64,
        fh: u64,
        offset: u64,
        size: u32,
    ) -> FuseResult<ReplyData> {
        let outcome = self.handle(fh)?.read(offset, size).await?;
        Ok(ReplyData {
            data: outcome.data,
        })
    }

    async fn write(
        &self,
        _req: Request,
        _ino: u64,
        fh: u64,
        offset: u64,
        data: &[u8],
        _write_flags: u32,
        _flags: u32,
    ) -> FuseResult<ReplyWrite> {
        let written = self.handle(fh)?.write(offset, data).await?;
        Ok(ReplyWrite { written })
    }

    async fn flush(&self, _req: Request, _inode: u64, _fh: u64, _lock_owner: u64) -> FuseResult<()> {
        Ok(())
    }

    async fn fsync(&self, _req: Request, _inode: u64, fh: u64, datasync: bool) -> FuseResult<()> {
        self.handle(fh)?.fsync(datasync).await?;
        Ok(())
    }

    async fn release(
        &self,
        _req: Request,
        _inode: u64,
        fh: u64,
        _flags: u32,
        _lock_owner: u64,
        _flush: bool,
    ) -> FuseResult<()> {
        let Some(handle) = self.handles.remove(fh) else {
            return Err(FsError::BadHandle(fh).into());
        };
        // in-flight calls may still hold a reference; the last one drops it
        if let Ok(handle) = Arc::try_unwrap(handle) {
            handle.release();
        }
        Ok(())
    }

    async fn fallocate(
        &self,
        _req: Request,
        _inode: u64,
        fh: u64,
        offset: u64,
        length: u64,
        mode: u32,
    ) -> FuseResult<()> {
        self.handle(fh)?.allocate(offset, length, mode).await?;
        Ok(())
    }

    // Directory handles are stateless: the listing is fetched per readdir.
    async fn opendir(&self, _req: Request, ino: u64, _flags: u32) -> FuseResult<ReplyOpen> {
        self.name_of(ino)?;
        Ok(ReplyOpen { fh: 0, flags: 0 })
    }

    async fn readdir<'a>(
        &'a self,
        _req: Request,
        ino: u64,
        _fh: u64,
        offset: i64,
    ) -> FuseResult<ReplyDirectory<Self::DirEntryStream<'a>>> {
        let (name, entries) = self.list(ino).await?;

        // offset is the offset of the last entry returned; resume after it.
        // Plain readdir does not count as a lookup, so names the kernel has
        // not looked up get no inode here.
        let mut all: Vec<DirectoryEntry> = Vec::with_capacity(entries.len() + 2);
        all.push(DirectoryEntry {
            inode: ino,
            kind: FuseFileType::Directory,
            name: OsString::from("."),
            offset: 1,
        });
        all.push(DirectoryEntry {
            inode: self.inodes.peek(parent_name(&name)).unwrap_or(UNKNOWN_INO),
            kind: FuseFileType::Directory,
            name: OsString::from(".."),
            offset: 2,
        });
        for (i, e) in entries.iter().enumerate() {
            all.push(DirectoryEntry {
                inode: self
                    .inodes
                    .peek(&child_name(&name, &e.name))
                    .unwrap_or(UNKNOWN_INO),
                kind: kind_to_fuse(e.kind),
                name: OsString::from(&e.name),
                offset: (i as i64) + 3,
            });
        }

        let start = if offset <= 0 { 0 } else { offset as usize };
        let slice = if start >= all.len() {
            Vec::new()
        } else {
            all.split_off(start)
        };
        let boxed: Self::DirEntryStream<'a> = Box::pin(stream::iter(slice.into_iter().map(Ok)));
        Ok(ReplyDirectory { entries: boxed })
    }

    async fn readdirplus<'a>(
        &'a self,
        req: Request,
        ino: u64,
        _fh: u64,
        offset: u64,
        _lock_owner: u64,
    ) -> FuseResult<ReplyDirectoryPlus<Self::DirEntryPlusStream<'a>>> {
        let (name, entries) = self.list(ino).await?;
        let ttl = self.options.attr_ttl;
        let dir_attr = FileAttributes::directory();
        let start = offset as usize;

        let mut all: Vec<DirectoryEntryPlus> = Vec::with_capacity(entries.len() + 2);
        let parent_ino = self
            .inodes
            .peek(parent_name(&name))
            .unwrap_or(UNKNOWN_INO);
        for (i, (dot, dot_ino)) in [(".", ino), ("..", parent_ino)].into_iter().enumerate() {
            all.push(DirectoryEntryPlus {
                inode: dot_ino,
                generation: 0,
                kind: FuseFileType::Directory,
                name: OsString::from(dot),
                offset: (i as i64) + 1,
                attr: to_fuse_attr(dot_ino, &dir_attr, &req),
                entry_ttl: ttl,
                attr_ttl: ttl,
            });
        }
        for (i, e) in entries.iter().enumerate() {
            let entry_offset = (i as i64) + 3;
            // entries the kernel already consumed must not bump lookup counts
            if (entry_offset as u64) <= offset {
                continue;
            }
            let child = child_name(&name, &e.name);
            let attr = match e.kind {
                FileKind::Directory => dir_attr,
                FileKind::File => match self.ns.get_attr(&child).await {
                    Ok(attr) => attr,
                    Err(err) => {
                        debug!(%child, "skipping entry: {err}");
                        continue;
                    }
                },
            };
            let child_ino = self.inodes.lookup(&child);
            all.push(DirectoryEntryPlus {
                inode: child_ino,
                generation: 0,
                kind: kind_to_fuse(attr.kind),
                name: OsString::from(&e.name),
                offset: entry_offset,
                attr: to_fuse_attr(child_ino, &attr, &req),
                entry_ttl: ttl,
                attr_ttl: ttl,
            });
        }

        let slice: Vec<DirectoryEntryPlus> = all
            .into_iter()
            .filter(|e| (e.offset as usize) > start)
            .collect();
        let boxed: Self::DirEntryPlusStream<'a> = Box::pin(stream::iter(slice.into_iter().map(Ok)));
        Ok(ReplyDirectoryPlus { entries: boxed })
    }

    async fn releasedir(
        &self,
        _req: Request,
        _inode: u64,
        _fh: u64,
        _flags: u32,
    ) -> FuseResult<()> {
        Ok(())
    }

    async fn fsyncdir(
        &self,
        _req: Request,
        _inode: u64,
        _fh: u64,
        _datasync: bool,
    ) -> FuseResult<()> {
        Ok(())
    }

    // The remote side exposes no capacity figures.
    async fn statfs(&self, _req: Request, _ino: u64) -> FuseResult<ReplyStatFs> {
        Ok(ReplyStatFs {
            blocks: 0,
            bfree: 0,
            bavail: 0,
            files: 0,
            ffree: u64::MAX,
            bsize: 4096,
            namelen: 255,
            frsize: 4096,
        })
    }

    async fn interrupt(&self, _req: Request, _unique: u64) -> FuseResult<()> {
        Ok(())
    }
}

// =============== helpers ===============
fn kind_to_fuse(k: FileKind) -> FuseFileType {
    match k {
        FileKind::Directory => FuseFileType::Directory,
        FileKind::File => FuseFileType::RegularFile,
    }
}

fn to_system_time(ts: Timestamp) -> SystemTime {
    if ts.sec >= 0 {
        UNIX_EPOCH + Duration::new(ts.sec as u64, ts.nsec)
    } else {
        UNIX_EPOCH
    }
}

fn to_fuse_attr(ino: u64, a: &FileAttributes, req: &Request) -> FileAttr {
    // no remote timestamps; report the time of the request
    let now = Timestamp::from(SystemTime::now());
    FileAttr {
        ino,
        size: a.size,
        blocks: a.size.div_ceil(512),
        atime: now,
        mtime: now,
        ctime: now,
        #[cfg(target_os = "macos")]
        crtime: now,
        kind: kind_to_fuse(a.kind),
        perm: a.perm,
        nlink: if a.is_dir() { 2 } else { 1 },
        uid: req.uid,
        gid: req.gid,
        rdev: 0,
        #[cfg(target_os = "macos")]
        flags: 0,
        blksize: 4096,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cadapter::RemoteClient;
    use crate::cadapter::memory::MemoryBackend;
    use crate::vfs::{AdapterConfig, NamespaceAdapter};
    use futures_util::StreamExt;

    fn req() -> Request {
        Request {
            unique: 1,
            uid: 1000,
            gid: 1000,
            pid: 42,
        }
    }

    async fn seeded() -> (Arc<MemoryBackend>, RemoteFs<NamespaceAdapter>) {
        let backend = Arc::new(MemoryBackend::new());
        backend.insert_file("/cfs0/test/a.txt", b"abc".to_vec()).await;
        backend.insert_file("/cfs0/test/b.txt", b"hello".to_vec()).await;
        let client: Arc<dyn RemoteClient> = backend.clone();
        let fs = RemoteFs::new(
            NamespaceAdapter::new(client, AdapterConfig::default()),
            FsOptions::default(),
        );
        (backend, fs)
    }

    async fn readdir_names(fs: &RemoteFs<NamespaceAdapter>, offset: i64) -> Vec<(String, i64, u64)> {
        let reply = fs
            .readdir(req(), ROOT_INO, 0, offset)
            .await
            .unwrap_or_else(|e| panic!("readdir failed: {e}"));
        reply
            .entries
            .map(|e| {
                let e = e.unwrap();
                (e.name.to_string_lossy().into_owned(), e.offset, e.inode)
            })
            .collect()
            .await
    }

    #[tokio::test]
    async fn test_readdir_resumes_after_offset() {
        let (_backend, fs) = seeded().await;
        let all = readdir_names(&fs, 0).await;
        let names: Vec<_> = all.iter().map(|(n, off, _)| (n.as_str(), *off)).collect();
        assert_eq!(
            names,
            vec![(".", 1), ("..", 2), ("a.txt", 3), ("b.txt", 4)]
        );
        // names never looked up get no inode and leave the table untouched
        assert_eq!(all[2].2, UNKNOWN_INO);
        assert_eq!(fs.inodes.len(), 1);

        let rest = readdir_names(&fs, 3).await;
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].0, "b.txt");
        assert!(readdir_names(&fs, 4).await.is_empty());

        let a = fs.lookup(req(), ROOT_INO, OsStr::new("a.txt")).await.unwrap();
        let again = readdir_names(&fs, 2).await;
        assert_eq!(again[0], ("a.txt".to_string(), 3, a.attr.ino));
    }

    #[tokio::test]
    async fn test_readdirplus_counts_only_returned_entries() {
        let (_backend, fs) = seeded().await;
        let reply = fs
            .readdirplus(req(), ROOT_INO, 0, 3, 0)
            .await
            .unwrap_or_else(|e| panic!("readdirplus failed: {e}"));
        let entries: Vec<_> = reply.entries.map(|e| e.unwrap()).collect().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, OsString::from("b.txt"));
        assert_eq!(entries[0].attr.size, 5);
        assert_eq!(entries[0].attr.perm, 0o644);

        // only b.txt was handed out, once
        assert_eq!(fs.inodes.len(), 2);
        assert!(fs.inodes.peek("a.txt").is_none());
        fs.forget(req(), entries[0].inode, 1).await;
        assert_eq!(fs.inodes.len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_getattr_and_forget() {
        let (_backend, fs) = seeded().await;
        let entry = fs.lookup(req(), ROOT_INO, OsStr::new("a.txt")).await.unwrap();
        assert_eq!(entry.attr.size, 3);
        assert_eq!(entry.attr.uid, 1000);
        assert!(matches!(entry.attr.kind, FuseFileType::RegularFile));

        let root = fs.getattr(req(), ROOT_INO, None, 0).await.unwrap();
        assert!(matches!(root.attr.kind, FuseFileType::Directory));
        assert_eq!(root.attr.perm, 0o755);

        let ino = entry.attr.ino;
        assert_eq!(fs.getattr(req(), ino, None, 0).await.unwrap().attr.size, 3);
        fs.batch_forget(req(), &[(ino, 1)]).await;
        let err = fs.getattr(req(), ino, None, 0).await.unwrap_err();
        assert_eq!(err, Errno::from(libc::ENOENT));
    }

    #[tokio::test]
    async fn test_getattr_prefers_open_handle() {
        let (backend, fs) = seeded().await;
        let ino = fs
            .lookup(req(), ROOT_INO, OsStr::new("b.txt"))
            .await
            .unwrap()
            .attr
            .ino;
        let fh = fs.open(req(), ino, libc::O_RDWR as u32).await.unwrap().fh;
        fs.forget(req(), ino, 1).await;

        // the inode is gone, the handle still names the file
        backend.insert_file("/cfs0/test/b.txt", b"hello world".to_vec()).await;
        let attr = fs.getattr(req(), ino, Some(fh), 0).await.unwrap();
        assert_eq!(attr.attr.size, 11);
        assert_eq!(
            fs.getattr(req(), ino, None, 0).await.unwrap_err(),
            Errno::from(libc::ENOENT)
        );
    }

    #[tokio::test]
    async fn test_read_write_and_release() {
        let (backend, fs) = seeded().await;
        let ino = fs
            .lookup(req(), ROOT_INO, OsStr::new("a.txt"))
            .await
            .unwrap()
            .attr
            .ino;
        let opened = fs.open(req(), ino, libc::O_RDWR as u32).await.unwrap();
        assert_eq!(opened.flags, OpenOptions::DIRECT_IO.bits());
        let fh = opened.fh;

        let data = fs.read(req(), ino, fh, 0, 16).await.unwrap();
        assert_eq!(&data.data[..], b"abc");
        let written = fs.write(req(), ino, fh, 3, b"def", 0, 0).await.unwrap();
        assert_eq!(written.written, 3);
        assert_eq!(backend.contents("/cfs0/test/a.txt").await.unwrap(), b"abcdef");

        fs.flush(req(), ino, fh, 0).await.unwrap();
        fs.fsync(req(), ino, fh, false).await.unwrap();
        fs.fallocate(req(), ino, fh, 0, 4096, 0).await.unwrap();

        fs.release(req(), ino, fh, 0, 0, false).await.unwrap();
        assert_eq!(fs.handles.len(), 0);
        let ebadf = Errno::from(libc::EBADF);
        assert_eq!(fs.read(req(), ino, fh, 0, 16).await.unwrap_err(), ebadf);
        assert_eq!(fs.write(req(), ino, fh, 0, b"x", 0, 0).await.unwrap_err(), ebadf);
        assert_eq!(fs.release(req(), ino, fh, 0, 0, false).await.unwrap_err(), ebadf);
    }

    #[tokio::test]
    async fn test_remote_outage_fails_only_the_call() {
        let (backend, fs) = seeded().await;
        let ino = fs
            .lookup(req(), ROOT_INO, OsStr::new("a.txt"))
            .await
            .unwrap()
            .attr
            .ino;
        let fh = fs.open(req(), ino, libc::O_RDONLY as u32).await.unwrap().fh;

        backend.set_offline(true);
        assert_eq!(
            fs.read(req(), ino, fh, 0, 3).await.unwrap_err(),
            Errno::from(libc::EIO)
        );
        backend.set_offline(false);
        assert_eq!(&fs.read(req(), ino, fh, 0, 3).await.unwrap().data[..], b"abc");
    }

    #[tokio::test]
    async fn test_setattr_size_goes_through_transient_handle() {
        let (backend, fs) = seeded().await;
        let ino = fs
            .lookup(req(), ROOT_INO, OsStr::new("b.txt"))
            .await
            .unwrap()
            .attr
            .ino;
        let set_attr = SetAttr {
            size: Some(0),
            mtime: Some(Timestamp { sec: 10, nsec: 0 }),
            ..SetAttr::default()
        };
        // truncate is accepted without touching remote data
        let reply = fs.setattr(req(), ino, None, set_attr).await.unwrap();
        assert_eq!(reply.attr.size, 5);
        assert_eq!(backend.contents("/cfs0/test/b.txt").await.unwrap(), b"hello");
        assert_eq!(fs.handles.len(), 0);
    }

    #[tokio::test]
    async fn test_flat_listing_rejects_subdirectories() {
        let (backend, fs) = seeded().await;
        backend.create_dir("/cfs0/test/sub").await;
        let sub = fs.lookup(req(), ROOT_INO, OsStr::new("sub")).await.unwrap();
        assert!(matches!(sub.attr.kind, FuseFileType::Directory));
        assert_eq!(sub.attr.nlink, 2);
        let err = fs.readdir(req(), sub.attr.ino, 0, 0).await.err();
        assert_eq!(err, Some(Errno::from(libc::ENOENT)));
    }

    #[test]
    fn test_timestamp_conversion() {
        let ts = Timestamp { sec: 10, nsec: 5 };
        assert_eq!(to_system_time(ts), UNIX_EPOCH + Duration::new(10, 5));
        let before_epoch = Timestamp { sec: -1, nsec: 0 };
        assert_eq!(to_system_time(before_epoch), UNIX_EPOCH);
    }

    #[test]
    fn test_errno_conversion() {
        let errno: Errno = FsError::BadHandle(3).into();
        assert_eq!(errno, Errno::from(libc::EBADF));
        assert!(matches!(kind_to_fuse(FileKind::File), FuseFileType::RegularFile));
        assert!(matches!(kind_to_fuse(FileKind::Directory), FuseFileType::Directory));
    }
}
