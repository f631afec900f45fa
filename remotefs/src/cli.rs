use crate::fuse::FsOptions;
use crate::fuse::mount::MountConfig;
use crate::vfs::{AdapterConfig, FsError, ListingMode, StatFailurePolicy};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// S3-compatible object store at `--endpoint`
    S3,
    /// Directory on this host at `--local-root`
    Local,
    /// Process-local, empty at start; for trying out a mount
    Memory,
}

#[derive(Parser, Debug)]
#[command(version, about = "Mount a remote storage namespace as a FUSE filesystem", long_about = None)]
pub struct Args {
    /// Empty directory to mount on
    #[arg(value_name = "MOUNTPOINT")]
    pub mountpoint: PathBuf,

    /// Remote storage endpoint
    #[arg(long, env = "REMOTEFS_ENDPOINT", default_value = "http://localhost:15524")]
    pub endpoint: String,

    /// Storage backend serving the namespace
    #[arg(long, env = "REMOTEFS_BACKEND", value_enum, default_value_t = BackendKind::S3)]
    pub backend: BackendKind,

    /// Bucket holding the namespace (s3 backend)
    #[arg(long, env = "REMOTEFS_BUCKET", default_value = "remotefs")]
    pub bucket: String,

    /// Region reported to the S3 endpoint
    #[arg(long, env = "REMOTEFS_REGION", default_value = "us-east-1")]
    pub region: String,

    /// Root directory of the local backend
    #[arg(long, env = "REMOTEFS_LOCAL_ROOT")]
    pub local_root: Option<PathBuf>,

    /// Remote path prepended to every name under the mount point
    #[arg(long, env = "REMOTEFS_PREFIX", default_value = crate::vfs::config::DEFAULT_PREFIX)]
    pub prefix: String,

    /// What getattr reports when a remote stat fails
    #[arg(long, value_enum, default_value_t = StatFailurePolicy::AssumeDirectory)]
    pub stat_failure: StatFailurePolicy,

    /// Which directories can be listed
    #[arg(long, value_enum, default_value_t = ListingMode::Flat)]
    pub listing: ListingMode,

    /// Deadline for each remote call in milliseconds; unbounded when unset
    #[arg(long, env = "REMOTEFS_CALL_TIMEOUT_MS")]
    pub call_timeout_ms: Option<u64>,

    /// Kernel attribute/entry cache lifetime in milliseconds
    #[arg(long, default_value_t = 0)]
    pub attr_ttl_ms: u64,

    /// Let the kernel page-cache file data
    #[arg(long, default_value_t = false)]
    pub kernel_cache: bool,

    /// Mount directly instead of through fusermount3
    #[arg(long, default_value_t = false)]
    pub privileged: bool,

    /// Allow other users to access the mount
    #[arg(long, default_value_t = false)]
    pub allow_other: bool,
}

impl Args {
    pub fn adapter_config(&self) -> Result<AdapterConfig, FsError> {
        Ok(AdapterConfig::new(self.prefix.clone())?
            .with_stat_failure(self.stat_failure)
            .with_listing(self.listing)
            .with_call_timeout(self.call_timeout_ms.map(Duration::from_millis)))
    }

    pub fn fs_options(&self) -> FsOptions {
        FsOptions {
            attr_ttl: Duration::from_millis(self.attr_ttl_ms),
            kernel_cache: self.kernel_cache,
        }
    }

    pub fn mount_config(&self) -> MountConfig {
        MountConfig {
            privileged: self.privileged,
            allow_other: self.allow_other,
        }
    }
}
