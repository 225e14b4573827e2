mod common;

use std::fs;

use wishes_client::ingest::{self, IngestConfig, IngestSummary};
use wishes_client::WishesClient;
use wishes_server::MemoryStore;

fn dirs(root: &std::path::Path) -> IngestConfig {
    IngestConfig {
        scan_dir: root.join("scanned-wishes"),
        processed_dir: root.join("processed"),
        error_dir: root.join("error"),
    }
}

#[tokio::test]
async fn routes_files_by_outcome() {
    let store = MemoryStore::new();
    let base = common::spawn_server(store.clone()).await;
    let client = WishesClient::new(base);

    let tmp = tempfile::tempdir().unwrap();
    let cfg = dirs(tmp.path());
    fs::create_dir_all(&cfg.scan_dir).unwrap();
    fs::write(cfg.scan_dir.join("alice.txt"), "Alice\nA bicycle\n").unwrap();
    fs::write(cfg.scan_dir.join("short.txt"), "Only a name\n").unwrap();
    fs::write(cfg.scan_dir.join("empty-wish.txt"), "Carol\n\n").unwrap();
    fs::write(cfg.scan_dir.join("notes.md"), "Dave\nA drum\n").unwrap();

    let summary = ingest::run_once(&client, &cfg).await.unwrap();
    assert_eq!(
        summary,
        IngestSummary {
            processed: 1,
            failed: 2
        }
    );

    assert!(cfg.processed_dir.join("alice.txt").exists());
    assert!(cfg.error_dir.join("short.txt").exists());
    assert!(cfg.error_dir.join("empty-wish.txt").exists());
    assert!(cfg.scan_dir.join("notes.md").exists());
    assert!(!cfg.scan_dir.join("alice.txt").exists());

    let all = client.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Alice");
    assert_eq!(all[0].wish, "A bicycle");
}

#[tokio::test]
async fn duplicate_submission_lands_in_error_dir() {
    let base = common::spawn_server(MemoryStore::new()).await;
    let client = WishesClient::new(base);

    let tmp = tempfile::tempdir().unwrap();
    let cfg = dirs(tmp.path());
    fs::create_dir_all(&cfg.scan_dir).unwrap();
    fs::write(cfg.scan_dir.join("a.txt"), "Alice\nA bicycle").unwrap();
    fs::write(cfg.scan_dir.join("b.txt"), "Alice\nA kite").unwrap();

    let summary = ingest::run_once(&client, &cfg).await.unwrap();
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed, 1);
    assert!(cfg.processed_dir.join("a.txt").exists());
    assert!(cfg.error_dir.join("b.txt").exists());
}

#[tokio::test]
async fn unreachable_service_moves_files_to_error_dir() {
    let client = WishesClient::new(common::dead_url().await);

    let tmp = tempfile::tempdir().unwrap();
    let cfg = dirs(tmp.path());
    fs::create_dir_all(&cfg.scan_dir).unwrap();
    fs::write(cfg.scan_dir.join("alice.txt"), "Alice\nA bicycle\n").unwrap();

    let summary = ingest::run_once(&client, &cfg).await.unwrap();
    assert_eq!(summary.failed, 1);
    assert!(cfg.error_dir.join("alice.txt").exists());
}

#[tokio::test]
async fn creates_missing_directories() {
    let client = WishesClient::new(common::dead_url().await);
    let tmp = tempfile::tempdir().unwrap();
    let cfg = dirs(tmp.path());

    let summary = ingest::run_once(&client, &cfg).await.unwrap();
    assert_eq!(summary, IngestSummary::default());
    assert!(cfg.scan_dir.is_dir());
    assert!(cfg.processed_dir.is_dir());
    assert!(cfg.error_dir.is_dir());
}

#[tokio::test]
async fn blocked_processed_move_routes_file_to_error_dir() {
    let store = MemoryStore::new();
    let base = common::spawn_server(store.clone()).await;
    let client = WishesClient::new(base);

    let tmp = tempfile::tempdir().unwrap();
    let cfg = dirs(tmp.path());
    fs::create_dir_all(&cfg.scan_dir).unwrap();
    fs::write(cfg.scan_dir.join("alice.txt"), "Alice\nA bicycle\n").unwrap();
    // A non-empty directory where the processed file would go.
    let blocker = cfg.processed_dir.join("alice.txt");
    fs::create_dir_all(&blocker).unwrap();
    fs::write(blocker.join("keep"), "").unwrap();

    let first = ingest::run_once(&client, &cfg).await.unwrap();
    assert_eq!(
        first,
        IngestSummary {
            processed: 0,
            failed: 1
        }
    );
    assert!(!cfg.scan_dir.join("alice.txt").exists());
    assert!(cfg.error_dir.join("alice.txt").is_file());

    // Nothing is left behind to be submitted again.
    let second = ingest::run_once(&client, &cfg).await.unwrap();
    assert_eq!(second, IngestSummary::default());
    assert_eq!(store.insert_attempts(), 1);
}
