//! Integration tests for the `conway-db` data layer.
//!
//! These run the store against a real data directory under the system temp
//! dir, one fresh directory per test, and check what survives a reopen.

// Integration tests use expect/unwrap extensively for clarity -- panicking
// on failure is the correct behavior in test code.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::indexing_slicing
)]

use std::path::{Path, PathBuf};

use conway_db::{BoardStore, FileRepository};
use conway_types::{Board, BoardId};
use uuid::Uuid;

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("conway-db-it-{}", Uuid::new_v4()))
}

async fn open_store(dir: &Path) -> BoardStore<FileRepository> {
    let repo = FileRepository::open(dir)
        .await
        .expect("Failed to open data directory");
    BoardStore::open(repo).await.expect("Failed to open store")
}

fn glider() -> Board {
    Board::from_binary_grid(&[
        vec![0, 1, 0, 0, 0],
        vec![0, 0, 1, 0, 0],
        vec![1, 1, 1, 0, 0],
        vec![0, 0, 0, 0, 0],
        vec![0, 0, 0, 0, 0],
    ])
    .unwrap()
}

#[tokio::test]
async fn saved_boards_survive_reopen() {
    let dir = temp_dir();
    let board = glider();
    let stepped = conway_core::step_n(&board, 4);

    {
        let store = open_store(&dir).await;
        store.save(&stepped).await.unwrap();
    }

    let store = open_store(&dir).await;
    assert_eq!(store.cached_len().await, 1);
    let loaded = store.get(board.id()).await.unwrap().unwrap();
    assert_eq!(loaded.generation(), 4);
    assert_eq!(loaded.to_binary_grid(), stepped.to_binary_grid());
}

#[tokio::test]
async fn record_file_matches_codec_output() {
    let dir = temp_dir();
    let store = open_store(&dir).await;
    let board = glider();
    store.save(&board).await.unwrap();

    let path = store.repository().record_path(board.id());
    let on_disk = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(on_disk, "5,5,0\n01000\n00100\n11100\n00000\n00000\n");
}

#[tokio::test]
async fn corrupt_files_are_skipped_on_open() {
    let dir = temp_dir();
    let good = glider();
    let bad = BoardId::new();

    {
        let store = open_store(&dir).await;
        store.save(&good).await.unwrap();
    }
    tokio::fs::write(dir.join(format!("{bad}.board")), "2,2,0\n10\n")
        .await
        .unwrap();

    let store = open_store(&dir).await;
    assert_eq!(store.ids().await, vec![good.id()]);
    assert!(store.get(bad).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_removes_the_file() {
    let dir = temp_dir();
    let store = open_store(&dir).await;
    let board = glider();
    store.save(&board).await.unwrap();
    let path = store.repository().record_path(board.id());
    assert!(path.exists());

    assert!(store.delete(board.id()).await.unwrap());
    assert!(!path.exists());
    assert!(store.get(board.id()).await.unwrap().is_none());
    assert!(!store.delete(board.id()).await.unwrap());
}

#[tokio::test]
async fn record_written_behind_the_cache_is_read_through() {
    let dir = temp_dir();
    let store = open_store(&dir).await;
    let board = glider().with_generation(12);
    tokio::fs::write(
        store.repository().record_path(board.id()),
        board.serialize(),
    )
    .await
    .unwrap();

    let loaded = store.get(board.id()).await.unwrap().unwrap();
    assert_eq!(loaded.generation(), 12);
    assert_eq!(store.cached_len().await, 1);
}
