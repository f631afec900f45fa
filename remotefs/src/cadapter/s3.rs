//! S3 adapter: serves the remote namespace from an S3-compatible bucket via
//! aws-sdk-s3. Objects are whole files; offset writes are read-modify-write.

use crate::cadapter::client::{
    ClientError, DEFAULT_MAX_OBJECT_SIZE, ReadFlags, ReadReply, RemoteClient, RemoteDirEntry,
    StatInfo, checksum, write_end,
};
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::ProvideErrorMetadata;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use bytes::Bytes;
use std::collections::BTreeMap;
use tokio::time::{Duration, sleep};
use tracing::{debug, warn};

/// S3 backend configuration
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Endpoint of the S3-compatible service
    pub endpoint: String,
    pub bucket: String,
    pub region: String,
    /// Maximum retry attempts per request
    pub max_retries: u32,
    /// Initial retry delay (ms), doubled on every attempt
    pub initial_retry_delay_ms: u64,
    /// Writes that would grow an object past this many bytes are refused
    pub max_object_size: u64,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:15524".to_string(),
            bucket: "remotefs".to_string(),
            region: "us-east-1".to_string(),
            max_retries: 3,
            initial_retry_delay_ms: 100,
            max_object_size: DEFAULT_MAX_OBJECT_SIZE,
        }
    }
}

pub struct S3Backend {
    client: Client,
    config: S3Config,
}

/// Object keys carry no leading separator.
fn object_key(path: &str) -> String {
    path.trim_start_matches('/').to_string()
}

/// Listing prefix for a directory path: `a/b/`, or empty for the bucket root.
fn dir_prefix(path: &str) -> String {
    let key = object_key(path);
    let key = key.trim_end_matches('/');
    if key.is_empty() {
        String::new()
    } else {
        format!("{key}/")
    }
}

/// Splice `data` into `current` at `offset`, zero-filling any gap.
fn splice(
    mut current: Vec<u8>,
    offset: u64,
    data: &[u8],
    max_object_size: u64,
) -> Result<Vec<u8>, ClientError> {
    let end = write_end(offset, data.len(), max_object_size)?;
    let start = end - data.len();
    if current.len() < end {
        current.resize(end, 0);
    }
    current[start..end].copy_from_slice(data);
    Ok(current)
}

impl S3Backend {
    /// Build a client for `config.endpoint` and probe the bucket. A failed
    /// probe means the remote is unusable and is returned as an error.
    pub async fn connect(config: S3Config) -> Result<Self, ClientError> {
        let conf = aws_config::ConfigLoader::default()
            .credentials_provider(
                aws_config::environment::EnvironmentVariableCredentialsProvider::new(),
            )
            .region(aws_sdk_s3::config::Region::new(config.region.clone()))
            .endpoint_url(&config.endpoint)
            .load()
            .await;
        let s3_conf = aws_sdk_s3::config::Builder::from(&conf)
            .force_path_style(true)
            .build();
        let client = Client::from_conf(s3_conf);

        client
            .head_bucket()
            .bucket(&config.bucket)
            .send()
            .await
            .map_err(|e| {
                ClientError::Unavailable(format!(
                    "bucket {} at {}: {e}",
                    config.bucket, config.endpoint
                ))
            })?;
        Ok(Self { client, config })
    }

    fn md5_base64(data: &[u8]) -> String {
        let sum = md5::compute(data);
        B64.encode(sum.0)
    }

    async fn execute_with_retry<T, F, Fut, E>(
        &self,
        operation: F,
        operation_name: &'static str,
    ) -> Result<T, E>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut attempt = 0;
        let max_retries = self.config.max_retries;
        loop {
            attempt += 1;
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if attempt > max_retries {
                        warn!(operation_name, attempt, "giving up: {e}");
                        return Err(e);
                    }
                    let delay_ms = self.config.initial_retry_delay_ms * 2u64.pow(attempt - 1);
                    debug!(operation_name, attempt, delay_ms, "retrying: {e}");
                    sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }

    /// Fetch a whole object, `None` when the key does not exist.
    async fn get_whole(&self, key: &str) -> Result<Option<Vec<u8>>, ClientError> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await;
        match resp {
            Ok(o) => {
                use tokio::io::AsyncReadExt;
                let mut body = o.body.into_async_read();
                let mut buf = Vec::new();
                body.read_to_end(&mut buf).await?;
                Ok(Some(buf))
            }
            Err(e) => {
                let no_such_key = e
                    .as_service_error()
                    .map(|se| se.is_no_such_key())
                    .unwrap_or(false);
                if no_such_key {
                    Ok(None)
                } else {
                    Err(ClientError::Unavailable(e.to_string()))
                }
            }
        }
    }
}

#[async_trait]
impl RemoteClient for S3Backend {
    async fn stat(&self, path: &str) -> Result<StatInfo, ClientError> {
        let key = object_key(path);
        let resp = self
            .client
            .head_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .send()
            .await;
        match resp {
            Ok(o) => Ok(StatInfo {
                total_size: o.content_length().unwrap_or(0).max(0) as u64,
            }),
            Err(e) => {
                let not_found = e
                    .as_service_error()
                    .map(|se| se.is_not_found())
                    .unwrap_or(false);
                if not_found {
                    Err(ClientError::NotFound(path.to_string()))
                } else {
                    Err(ClientError::Unavailable(e.to_string()))
                }
            }
        }
    }

    async fn read_dir(&self, path: &str) -> Result<Vec<RemoteDirEntry>, ClientError> {
        let prefix = dir_prefix(path);
        let mut children: BTreeMap<String, bool> = BTreeMap::new();
        let mut token: Option<String> = None;
        loop {
            let operation = || async {
                self.client
                    .list_objects_v2()
                    .bucket(&self.config.bucket)
                    .prefix(&prefix)
                    .delimiter("/")
                    .set_continuation_token(token.clone())
                    .send()
                    .await
            };
            let page = self
                .execute_with_retry(operation, "list_objects_v2")
                .await
                .map_err(|e| ClientError::Unavailable(e.to_string()))?;

            for cp in page.common_prefixes() {
                if let Some(name) = cp
                    .prefix()
                    .and_then(|p| p.strip_prefix(prefix.as_str()))
                    .map(|p| p.trim_end_matches('/'))
                    .filter(|p| !p.is_empty())
                {
                    children.insert(name.to_string(), true);
                }
            }
            for obj in page.contents() {
                // "dir/" marker objects name the directory itself
                if let Some(name) = obj
                    .key()
                    .and_then(|k| k.strip_prefix(prefix.as_str()))
                    .filter(|k| !k.is_empty())
                {
                    children.entry(name.to_string()).or_insert(false);
                }
            }

            if page.is_truncated().unwrap_or(false) {
                token = page.next_continuation_token().map(str::to_string);
                if token.is_some() {
                    continue;
                }
            }
            break;
        }

        if children.is_empty() && !prefix.is_empty() {
            // S3 has no real directories: an empty listing under a prefix that
            // is not a marker object is indistinguishable from a missing one.
            let marker = self.get_whole(&prefix).await?;
            if marker.is_none() {
                return Err(ClientError::NotFound(path.to_string()));
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
        if length == 0 {
            return Ok(ReadReply::default());
        }
        let key = object_key(path);
        let range = format!("bytes={}-{}", offset, offset + length - 1);
        let resp = self
            .client
            .get_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .range(range)
            .send()
            .await;
        let buf = match resp {
            Ok(o) => {
                use tokio::io::AsyncReadExt;
                let mut body = o.body.into_async_read();
                let mut buf = Vec::new();
                body.read_to_end(&mut buf).await?;
                buf
            }
            Err(e) => match e.as_service_error() {
                Some(se) if se.is_no_such_key() => {
                    return Err(ClientError::NotFound(path.to_string()));
                }
                // Range starting at or past the end of the object
                Some(se) if se.code() == Some("InvalidRange") => Vec::new(),
                _ => return Err(ClientError::Unavailable(e.to_string())),
            },
        };
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
        let limit = self.config.max_object_size;
        if !append {
            // refuse before fetching the current object
            write_end(offset, data.len(), limit)?;
        }
        let key = object_key(path);
        let current = self.get_whole(&key).await?.unwrap_or_default();
        let at = if append {
            current.len() as u64
        } else {
            offset
        };
        let updated = splice(current, at, data, limit)?;
        let checksum = Self::md5_base64(&updated);

        let operation = || async {
            self.client
                .put_object()
                .bucket(&self.config.bucket)
                .key(&key)
                .body(updated.clone().into())
                .content_md5(checksum.clone())
                .send()
                .await
        };
        self.execute_with_retry(operation, "put_object")
            .await
            .map_err(|e| ClientError::Unavailable(e.to_string()))?;
        Ok(data.len() as u64)
    }
}
