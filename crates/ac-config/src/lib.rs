mod config;
mod error;
mod log_level;
mod logging_config;
mod session_config;
mod storage_config;
mod transport_config;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use session_config::SessionConfig;
pub use storage_config::StorageConfig;
pub use transport_config::TransportConfig;

#[cfg(test)]
mod tests;

pub const CONFIG_DIR_ENV: &str = "AC_CONFIG_DIR";
pub const DEFAULT_CONFIG_DIR: &str = ".ac";
pub const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
