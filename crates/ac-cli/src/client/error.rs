use ac_config::ConfigError;
use ac_session::{SessionError, TransportError};
use ac_store::StoreError;

use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors that can occur while running a command
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error: {message} (code: {code}) {location}")]
    Api {
        code: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("GraphQL errors: {} {location}", .messages.join("; "))]
    Graphql {
        messages: Vec<String>,
        location: ErrorLocation,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid input: {message} {location}")]
    Input {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to read {path}: {source} {location}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Logger error: {message} {location}")]
    Logging {
        message: String,
        location: ErrorLocation,
    },

    #[error("Configuration error: {source} {location}")]
    Config {
        #[source]
        source: ConfigError,
        location: ErrorLocation,
    },

    #[error("Storage error: {source} {location}")]
    Storage {
        #[source]
        source: StoreError,
        location: ErrorLocation,
    },

    #[error("Session error: {source} {location}")]
    Session {
        #[source]
        source: SessionError,
        location: ErrorLocation,
    },
}

impl ClientError {
    /// Convert reqwest error with context
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        ClientError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        ClientError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    #[track_caller]
    pub fn api_error(code: impl Into<String>, message: impl Into<String>) -> Self {
        ClientError::Api {
            code: code.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn graphql(messages: Vec<String>) -> Self {
        ClientError::Graphql {
            messages,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn input(message: impl Into<String>) -> Self {
        ClientError::Input {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn io(path: PathBuf, source: std::io::Error) -> Self {
        ClientError::Io {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn logging(message: impl Into<String>) -> Self {
        ClientError::Logging {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        ClientError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for ClientError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        ClientError::from_json(err)
    }
}

impl From<ConfigError> for ClientError {
    #[track_caller]
    fn from(source: ConfigError) -> Self {
        ClientError::Config {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<StoreError> for ClientError {
    #[track_caller]
    fn from(source: StoreError) -> Self {
        ClientError::Storage {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<SessionError> for ClientError {
    #[track_caller]
    fn from(source: SessionError) -> Self {
        ClientError::Session {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// How a failed GraphQL round trip looks to the session layer.
impl From<ClientError> for TransportError {
    #[track_caller]
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Graphql { messages, .. } => TransportError::graphql(messages),
            ClientError::Json { message, .. } => TransportError::decode(message),
            ClientError::Http { message, .. } => TransportError::network(message),
            ClientError::Api { code, message, .. } => {
                TransportError::network(format!("{message} (code: {code})"))
            }
            other => TransportError::network(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
