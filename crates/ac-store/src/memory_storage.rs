use crate::{ClientStorage, StoreResult};

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Non-durable storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            items: RwLock::new(
                items
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl ClientStorage for MemoryStorage {
    async fn get_item(&self, name: &str) -> StoreResult<Option<String>> {
        Ok(self.items.read().await.get(name).cloned())
    }

    async fn set_item(&self, name: &str, value: &str) -> StoreResult<()> {
        self.items
            .write()
            .await
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, name: &str) -> StoreResult<()> {
        self.items.write().await.remove(name);
        Ok(())
    }
}
