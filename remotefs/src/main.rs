use anyhow::Context;
use clap::Parser;
use remotefs::cadapter::RemoteClient;
use remotefs::cadapter::localfs::LocalFsBackend;
use remotefs::cadapter::memory::MemoryBackend;
use remotefs::cadapter::s3::{S3Backend, S3Config};
use remotefs::cli::{Args, BackendKind};
use remotefs::fuse::RemoteFs;
use remotefs::fuse::mount::mount_remote_fs;
use remotefs::vfs::NamespaceAdapter;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

async fn connect(args: &Args) -> anyhow::Result<Arc<dyn RemoteClient>> {
    let client: Arc<dyn RemoteClient> = match args.backend {
        BackendKind::S3 => {
            let config = S3Config {
                endpoint: args.endpoint.clone(),
                bucket: args.bucket.clone(),
                region: args.region.clone(),
                ..S3Config::default()
            };
            Arc::new(
                S3Backend::connect(config)
                    .await
                    .with_context(|| format!("cannot connect to {}", args.endpoint))?,
            )
        }
        BackendKind::Local => {
            let root = args
                .local_root
                .as_ref()
                .context("--local-root is required for the local backend")?;
            tokio::fs::create_dir_all(root)
                .await
                .with_context(|| format!("cannot create {}", root.display()))?;
            Arc::new(LocalFsBackend::new(root))
        }
        BackendKind::Memory => {
            let backend = MemoryBackend::new();
            backend.create_dir(&args.prefix).await;
            Arc::new(backend)
        }
    };
    Ok(client)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let adapter_config = args.adapter_config()?;
    let client = connect(&args).await?;
    info!(backend = ?args.backend, endpoint = %args.endpoint, "connected to remote storage");

    let fs = RemoteFs::new(NamespaceAdapter::new(client, adapter_config), args.fs_options());
    let mut mount_handle = mount_remote_fs(fs, &args.mountpoint, args.mount_config())
        .await
        .with_context(|| format!("mount on {} failed", args.mountpoint.display()))?;
    info!(mountpoint = %args.mountpoint.display(), "mounted; press Ctrl+C to unmount");

    let handle = &mut mount_handle;
    tokio::select! {
        res = handle => res?,
        _ = shutdown_signal() => {
            info!("unmounting");
            mount_handle.unmount().await?;
        }
    }
    Ok(())
}
