use crate::{ClientStorage, StoreError, StoreResult};

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

type Items = BTreeMap<String, String>;

/// Storage backed by a single JSON object file.
///
/// Writes go to a temp file, are synced, then atomically renamed over the
/// target so a crash mid-write never leaves a truncated file behind.
pub struct FileStorage {
    path: PathBuf,
    /// Guards every read and write; recovering a corrupted file renames it.
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all items. Callers hold `write_lock`.
    ///
    /// A missing file is empty storage. A corrupted file is backed up and
    /// also treated as empty.
    async fn load(&self) -> StoreResult<Items> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No storage file at {:?}", self.path);
                return Ok(Items::new());
            }
            Err(e) => return Err(StoreError::file_read(self.path.clone(), e)),
        };

        match serde_json::from_str::<Items>(&contents) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!("Storage file corrupted at {:?}: {e}", self.path);
                self.rename_to_backup().await?;
                Ok(Items::new())
            }
        }
    }

    async fn save(&self, items: &Items) -> StoreResult<()> {
        let dir = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::dir_creation(dir.clone(), e))?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("storage.json"));
        let temp_path = dir.join(format!("{file_name}.tmp.{}", std::process::id()));

        let json = serde_json::to_string_pretty(items)?;

        {
            let mut file = fs::File::create(&temp_path)
                .await
                .map_err(|e| StoreError::file_write(temp_path.clone(), e))?;

            file.write_all(json.as_bytes())
                .await
                .map_err(|e| StoreError::file_write(temp_path.clone(), e))?;

            file.sync_all()
                .await
                .map_err(|e| StoreError::file_write(temp_path.clone(), e))?;
        }

        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StoreError::atomic_rename(temp_path, self.path.clone(), e));
        }

        Ok(())
    }

    /// Renames the storage file to `<file>.corrupted.<timestamp>`.
    pub async fn backup_corrupted(&self) -> StoreResult<Option<PathBuf>> {
        let _guard = self.write_lock.lock().await;
        self.rename_to_backup().await
    }

    async fn rename_to_backup(&self) -> StoreResult<Option<PathBuf>> {
        let timestamp = chrono::Utc::now().format(DATE_FORMAT);
        let mut backup = self.path.clone().into_os_string();
        backup.push(format!(".corrupted.{timestamp}"));
        let backup_path = PathBuf::from(backup);

        match fs::rename(&self.path, &backup_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::backup_failed(e)),
        }

        warn!("Backed up corrupted storage to {backup_path:?}");
        Ok(Some(backup_path))
    }
}

#[async_trait]
impl ClientStorage for FileStorage {
    async fn get_item(&self, name: &str) -> StoreResult<Option<String>> {
        let _guard = self.write_lock.lock().await;

        let items = self.load().await?;
        Ok(items.get(name).cloned())
    }

    async fn set_item(&self, name: &str, value: &str) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut items = self.load().await?;
        items.insert(name.to_string(), value.to_string());
        self.save(&items).await?;

        info!("Stored '{name}' in {:?}", self.path);
        Ok(())
    }

    async fn remove_item(&self, name: &str) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut items = self.load().await?;
        if items.remove(name).is_some() {
            self.save(&items).await?;
            info!("Removed '{name}' from {:?}", self.path);
        }
        Ok(())
    }
}
