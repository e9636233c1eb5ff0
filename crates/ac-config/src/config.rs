use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    LoggingConfig, SessionConfig, StorageConfig, TransportConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub session: SessionConfig,
    pub transport: TransportConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for AC_CONFIG_DIR env var, else use ./.ac/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply AC_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: AC_CONFIG_DIR env var > ./.ac/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.storage.validate()?;
        self.session.validate()?;
        self.transport.validate()?;

        if let Some(ref file) = self.logging.file
            && file.trim().is_empty()
        {
            return Err(ConfigError::logging("logging.file cannot be empty when set"));
        }

        Ok(())
    }

    /// Absolute path of the durable storage file.
    pub fn storage_path(&self) -> ConfigErrorResult<PathBuf> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.storage.dir).join(&self.storage.file))
    }

    /// Absolute path of the log file, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.logging.file {
            Some(ref file) => {
                let config_dir = Self::config_dir()?;
                Ok(Some(config_dir.join(&self.logging.dir).join(file)))
            }
            None => Ok(None),
        }
    }

    /// Log configuration summary (never logs stored token values).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  storage: {}/{} (actor key '{}')",
            self.storage.dir, self.storage.file, self.storage.actor_id_key
        );
        info!(
            "  session: current='{}', scoped=[{}], refetch={}",
            self.session.current_actor_field,
            self.session.actor_scoped_fields.join(", "),
            if self.session.refetch_enabled {
                "enabled"
            } else {
                "disabled"
            }
        );
        info!(
            "  transport: {} (timeout {}s)",
            self.transport.endpoint, self.transport.timeout_secs
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Storage
        Self::apply_env_string("AC_STORAGE_DIR", &mut self.storage.dir);
        Self::apply_env_string("AC_STORAGE_FILE", &mut self.storage.file);

        // Session
        Self::apply_env_string(
            "AC_SESSION_CURRENT_ACTOR_FIELD",
            &mut self.session.current_actor_field,
        );
        Self::apply_env_list(
            "AC_SESSION_ACTOR_SCOPED_FIELDS",
            &mut self.session.actor_scoped_fields,
        );
        Self::apply_env_bool(
            "AC_SESSION_REFETCH_ENABLED",
            &mut self.session.refetch_enabled,
        );

        // Transport
        Self::apply_env_string("AC_TRANSPORT_ENDPOINT", &mut self.transport.endpoint);
        Self::apply_env_parse(
            "AC_TRANSPORT_TIMEOUT_SECS",
            &mut self.transport.timeout_secs,
        );

        // Logging
        Self::apply_env_parse("AC_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("AC_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("AC_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }

    /// Helper: Apply environment variable override for comma separated lists
    fn apply_env_list(var_name: &str, target: &mut Vec<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }
}
