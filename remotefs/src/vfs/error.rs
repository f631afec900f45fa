use crate::cadapter::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("remote unavailable: {0}")]
    RemoteUnavailable(#[source] ClientError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown file handle {0}")]
    BadHandle(u64),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl FsError {
    /// errno reported to the process that issued the filesystem call.
    pub fn errno(&self) -> i32 {
        match self {
            FsError::NotFound(_) => libc::ENOENT,
            FsError::RemoteUnavailable(_) => libc::EIO,
            FsError::InvalidArgument(_) | FsError::Config(_) => libc::EINVAL,
            FsError::BadHandle(_) => libc::EBADF,
        }
    }
}

impl From<ClientError> for FsError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::NotFound(path) => FsError::NotFound(path),
            e if e.is_not_found() => FsError::NotFound(e.to_string()),
            e => FsError::RemoteUnavailable(e),
        }
    }
}
