use crate::{ClientStorage, FileStorage};

use std::sync::Arc;

use googletest::prelude::*;
use tempfile::TempDir;

fn storage_in(temp: &TempDir) -> FileStorage {
    FileStorage::new(temp.path().join("storage").join("storage.json"))
}

fn corrupted_backups(temp: &TempDir) -> Vec<String> {
    std::fs::read_dir(temp.path().join("storage"))
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("storage.json.corrupted."))
        .collect()
}

#[tokio::test]
async fn given_missing_file_when_get_item_then_none() {
    let temp = TempDir::new().unwrap();
    let storage = storage_in(&temp);

    assert!(storage.get_item("auth-user-actor-id").await.unwrap().is_none());
    assert_that!(storage.path().exists(), eq(false));
}

#[tokio::test]
async fn given_set_item_when_new_instance_reads_then_value_persisted() {
    let temp = TempDir::new().unwrap();
    storage_in(&temp)
        .set_item("auth-user-actor-id", "42")
        .await
        .unwrap();

    let reopened = storage_in(&temp);

    assert_eq!(
        reopened.get_item("auth-user-actor-id").await.unwrap(),
        Some("42".to_string())
    );
}

#[tokio::test]
async fn given_multiple_items_when_one_removed_then_others_kept() {
    let temp = TempDir::new().unwrap();
    let storage = storage_in(&temp);
    storage.set_item("auth-user-actor-id", "42").await.unwrap();
    storage.set_item("auth-access-token", "token").await.unwrap();

    storage.remove_item("auth-user-actor-id").await.unwrap();

    assert!(storage.get_item("auth-user-actor-id").await.unwrap().is_none());
    assert_eq!(
        storage.get_item("auth-access-token").await.unwrap(),
        Some("token".to_string())
    );
}

#[tokio::test]
async fn given_successful_write_when_listing_dir_then_no_temp_file_left() {
    let temp = TempDir::new().unwrap();
    let storage = storage_in(&temp);

    storage.set_item("auth-user-actor-id", "7").await.unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(temp.path().join("storage"))
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp."))
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn given_corrupted_file_when_get_item_then_empty_and_backup_created() {
    let temp = TempDir::new().unwrap();
    let storage = storage_in(&temp);
    std::fs::create_dir_all(temp.path().join("storage")).unwrap();
    std::fs::write(storage.path(), "{ not json").unwrap();

    let value = storage.get_item("auth-user-actor-id").await;

    assert_that!(value, ok(anything()));
    assert!(value.unwrap().is_none());
    assert_that!(storage.path().exists(), eq(false));
    assert_that!(corrupted_backups(&temp).len(), eq(1));
}

#[tokio::test]
async fn given_corrupted_file_when_set_item_then_file_rewritten() {
    let temp = TempDir::new().unwrap();
    let storage = storage_in(&temp);
    std::fs::create_dir_all(temp.path().join("storage")).unwrap();
    std::fs::write(storage.path(), "[1, 2, 3]").unwrap();

    storage.set_item("auth-user-actor-id", "42").await.unwrap();

    assert_eq!(
        storage.get_item("auth-user-actor-id").await.unwrap(),
        Some("42".to_string())
    );
    assert_that!(corrupted_backups(&temp).len(), eq(1));
}

#[tokio::test]
async fn given_no_file_when_backup_corrupted_then_none() {
    let temp = TempDir::new().unwrap();
    let storage = storage_in(&temp);

    assert!(storage.backup_corrupted().await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn given_corrupted_file_when_reads_overlap_writes_then_no_write_lost() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("storage")).unwrap();

    for round in 0..50 {
        let storage = Arc::new(storage_in(&temp));
        std::fs::write(storage.path(), "{not json").unwrap();

        let reader = {
            let storage = Arc::clone(&storage);
            tokio::spawn(async move { storage.get_item("auth-access-token").await })
        };
        let writer = {
            let storage = Arc::clone(&storage);
            let id = round.to_string();
            tokio::spawn(async move { storage.set_item("auth-user-actor-id", &id).await })
        };

        let read = reader.await.unwrap();
        let written = writer.await.unwrap();

        assert_that!(read, ok(anything()));
        assert_that!(written, ok(anything()));
        assert_eq!(
            storage.get_item("auth-user-actor-id").await.unwrap(),
            Some(round.to_string()),
            "round {round}"
        );
    }
}

#[tokio::test]
async fn given_corrupted_file_when_backup_corrupted_then_file_moved() {
    let temp = TempDir::new().unwrap();
    let storage = storage_in(&temp);
    std::fs::create_dir_all(temp.path().join("storage")).unwrap();
    std::fs::write(storage.path(), "{not json").unwrap();

    let backup = storage.backup_corrupted().await.unwrap();

    assert!(backup.is_some_and(|path| path.exists()));
    assert_that!(storage.path().exists(), eq(false));
}
