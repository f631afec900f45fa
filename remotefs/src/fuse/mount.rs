//! Mount helpers for starting/stopping FUSE
//!
//! Notes:
//! - Only supported on Unix-like systems. On Linux we support unprivileged mount via fusermount3.
//! - These helpers are thin wrappers over rfuse3 raw Session APIs.

use std::path::Path;

use rfuse3::MountOptions;
use tracing::info;

use crate::fuse::RemoteFs;
use crate::vfs::NamespaceOps;

/// How the session is mounted.
#[derive(Clone, Copy, Debug, Default)]
pub struct MountConfig {
    /// Mount through the kernel directly instead of fusermount3.
    pub privileged: bool,
    /// Let users other than the mounting one see the filesystem.
    pub allow_other: bool,
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn mount_options(config: &MountConfig) -> MountOptions {
    let uid = unsafe { libc::getuid() };
    let gid = unsafe { libc::getgid() };

    let mut mo = MountOptions::default();
    mo.fs_name("remotefs").uid(uid).gid(gid);
    if config.allow_other {
        mo.allow_other(true);
    }
    mo
}

/// Mount `fs` on the given empty directory. The returned handle resolves when
/// the session ends and can be used to unmount.
#[cfg(target_os = "linux")]
pub async fn mount_remote_fs<N>(
    fs: RemoteFs<N>,
    mount_point: impl AsRef<Path>,
    config: MountConfig,
) -> std::io::Result<rfuse3::raw::MountHandle>
where
    N: NamespaceOps + 'static,
{
    let opts = mount_options(&config);
    let session = rfuse3::raw::Session::new(opts);
    let mount_point = mount_point.as_ref();
    info!(mount_point = %mount_point.display(), privileged = config.privileged, "mounting");
    if config.privileged {
        session.mount(fs, mount_point).await
    } else {
        // requires fusermount3 in PATH
        session.mount_with_unprivileged(fs, mount_point).await
    }
}

/// Fallback stub for non-Linux targets.
#[cfg(not(target_os = "linux"))]
pub async fn mount_remote_fs<N>(
    _fs: RemoteFs<N>,
    _mount_point: impl AsRef<Path>,
    _config: MountConfig,
) -> std::io::Result<rfuse3::raw::MountHandle>
where
    N: NamespaceOps + 'static,
{
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "FUSE mount is only supported on Linux in this build",
    ))
}
