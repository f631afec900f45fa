//! Remote storage adapter (cAdapter)
//!
//! Submodules:
//! - `client`: the `RemoteClient` trait and its request/reply types
//! - `memory`: in-process backend used by tests and local demos
//! - `localfs`: backend rooted in a local directory
//! - `s3`: S3-compatible backend built on `aws-sdk-s3`
//!
//! Responsibilities summary:
//! - Provide an async API for stat/list/read/write addressed by remote path.
//! - Normalize backend failures into `ClientError`.
//! - Own retries and connection handling; callers never retry.
pub mod client;
pub mod localfs;
pub mod memory;
pub mod s3;

pub use client::{ClientError, ReadFlags, ReadReply, RemoteClient, RemoteDirEntry, StatInfo};
