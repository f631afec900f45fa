use remotefs::cadapter::RemoteClient;
use remotefs::cadapter::localfs::LocalFsBackend;
use remotefs::vfs::{
    AdapterConfig, DirectoryEntry, FileHandleOps, FileKind, ListingMode, NamespaceAdapter,
    NamespaceOps, StatFailurePolicy,
};
use std::sync::Arc;

fn adapter_over(root: &std::path::Path, config: AdapterConfig) -> NamespaceAdapter {
    let client: Arc<dyn RemoteClient> = Arc::new(LocalFsBackend::new(root));
    NamespaceAdapter::new(client, config)
}

#[tokio::test]
async fn test_stat_and_listing_through_local_backend() {
    let tmp = tempfile::tempdir().unwrap();
    let ns_dir = tmp.path().join("cfs0/test");
    std::fs::create_dir_all(ns_dir.join("sub")).unwrap();
    std::fs::write(ns_dir.join("a.txt"), vec![b'x'; 42]).unwrap();

    let adapter = adapter_over(tmp.path(), AdapterConfig::default());

    let attr = adapter.get_attr("a.txt").await.unwrap();
    assert_eq!(attr.kind, FileKind::File);
    assert_eq!(attr.size, 42);

    let entries = adapter.open_dir("").await.unwrap();
    assert_eq!(
        entries,
        vec![
            DirectoryEntry {
                name: "a.txt".into(),
                kind: FileKind::File
            },
            DirectoryEntry {
                name: "sub".into(),
                kind: FileKind::Directory
            },
        ]
    );
    assert!(adapter.get_attr("sub").await.unwrap().is_dir());
    assert_eq!(adapter.open_dir("sub").await.unwrap_err().errno(), libc::ENOENT);
}

#[tokio::test]
async fn test_write_read_roundtrip_across_handles() {
    let tmp = tempfile::tempdir().unwrap();
    let adapter = adapter_over(tmp.path(), AdapterConfig::default());

    let writer = adapter.open("data.bin", libc::O_WRONLY as u32).await.unwrap();
    let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
    assert_eq!(writer.write(100, &data).await.unwrap() as usize, data.len());
    writer.release();

    let reader = adapter.open("data.bin", libc::O_RDONLY as u32).await.unwrap();
    let out = reader.read(100, data.len() as u32).await.unwrap();
    assert_eq!(out.count, data.len());
    assert_eq!(&out.data[..], &data[..]);

    // the gap before the first write reads back as zeros
    let head = reader.read(0, 100).await.unwrap();
    assert!(head.data.iter().all(|&b| b == 0));
    assert_eq!(reader.get_attr().await.unwrap().size, 10_100);
}

#[tokio::test]
async fn test_recursive_listing_and_strict_stat() {
    let tmp = tempfile::tempdir().unwrap();
    let ns_dir = tmp.path().join("ns");
    std::fs::create_dir_all(ns_dir.join("sub/deeper")).unwrap();
    std::fs::write(ns_dir.join("sub/b.txt"), b"b").unwrap();

    let config = AdapterConfig::new("/ns/")
        .unwrap()
        .with_listing(ListingMode::Recursive)
        .with_stat_failure(StatFailurePolicy::ConfirmWithListing);
    let adapter = adapter_over(tmp.path(), config);

    let entries = adapter.open_dir("sub").await.unwrap();
    let names: Vec<_> = entries.iter().map(|e| (e.name.as_str(), e.kind)).collect();
    assert_eq!(
        names,
        vec![("b.txt", FileKind::File), ("deeper", FileKind::Directory)]
    );
    assert!(adapter.get_attr("sub/deeper").await.unwrap().is_dir());
    assert_eq!(adapter.get_attr("nope").await.unwrap_err().errno(), libc::ENOENT);
    assert_eq!(adapter.get_attr("sub/b.txt").await.unwrap().size, 1);
}
