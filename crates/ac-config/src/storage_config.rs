use crate::{ConfigError, ConfigErrorResult};

use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_STORAGE_DIR: &str = "storage";
pub const DEFAULT_STORAGE_FILE: &str = "storage.json";
pub const DEFAULT_ACTOR_ID_KEY: &str = "auth-user-actor-id";
pub const DEFAULT_ACCESS_TOKEN_KEY: &str = "auth-access-token";
pub const DEFAULT_REFRESH_TOKEN_KEY: &str = "auth-refresh-token";

/// Durable client-side storage settings.
///
/// The three key names are the well-known entries shared with the rest of
/// the client: the last active actor id and the authentication token pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory relative to the config dir
    pub dir: String,
    pub file: String,
    pub actor_id_key: String,
    pub access_token_key: String,
    pub refresh_token_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: String::from(DEFAULT_STORAGE_DIR),
            file: String::from(DEFAULT_STORAGE_FILE),
            actor_id_key: String::from(DEFAULT_ACTOR_ID_KEY),
            access_token_key: String::from(DEFAULT_ACCESS_TOKEN_KEY),
            refresh_token_key: String::from(DEFAULT_REFRESH_TOKEN_KEY),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if Path::new(&self.dir).is_absolute() || self.dir.contains("..") {
            return Err(ConfigError::storage(
                "storage.dir must be relative and cannot contain '..'",
            ));
        }

        if self.file.is_empty() || self.file.contains('/') || self.file.contains('\\') {
            return Err(ConfigError::storage(format!(
                "storage.file must be a plain file name, got '{}'",
                self.file
            )));
        }

        let keys = [
            ("actor_id_key", &self.actor_id_key),
            ("access_token_key", &self.access_token_key),
            ("refresh_token_key", &self.refresh_token_key),
        ];

        for (name, value) in keys {
            if value.trim().is_empty() {
                return Err(ConfigError::storage(format!("storage.{name} cannot be empty")));
            }
        }

        if self.actor_id_key == self.access_token_key
            || self.actor_id_key == self.refresh_token_key
            || self.access_token_key == self.refresh_token_key
        {
            return Err(ConfigError::storage("storage key names must be distinct"));
        }

        Ok(())
    }
}
