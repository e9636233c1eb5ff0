use ac_store::StoreError;

use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

/// Failures of the GraphQL transport.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Network error: {message} {location}")]
    Network {
        message: String,
        location: ErrorLocation,
    },

    #[error("GraphQL errors: {} {location}", .messages.join("; "))]
    Graphql {
        messages: Vec<String>,
        location: ErrorLocation,
    },

    #[error("Failed to decode response: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },
}

impl TransportError {
    /// Whether this error is recoverable via retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    #[track_caller]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn graphql(messages: Vec<String>) -> Self {
        Self::Graphql {
            messages,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No identities available for the authenticated user {location}")]
    NoIdentitiesAvailable { location: ErrorLocation },

    #[error("Failed to activate actor {actor_id}: {source} {location}")]
    Activation {
        actor_id: String,
        #[source]
        source: StoreError,
        location: ErrorLocation,
    },

    #[error("Failed to evict root field '{field}': {source} {location}")]
    Eviction {
        field: String,
        #[source]
        source: StoreError,
        location: ErrorLocation,
    },

    #[error("Garbage collection failed: {source} {location}")]
    GarbageCollection {
        #[source]
        source: StoreError,
        location: ErrorLocation,
    },

    #[error("Refetch for actor {actor_id} failed: {source} {location}")]
    Refetch {
        actor_id: String,
        #[source]
        source: Box<SessionError>,
        location: ErrorLocation,
    },

    #[error("Storage error: {source} {location}")]
    Storage {
        #[source]
        source: StoreError,
        location: ErrorLocation,
    },

    #[error("Transport error: {source} {location}")]
    Transport {
        #[source]
        source: TransportError,
        location: ErrorLocation,
    },
}

impl SessionError {
    #[track_caller]
    pub fn no_identities_available() -> Self {
        Self::NoIdentitiesAvailable {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn activation(actor_id: impl Into<String>, source: StoreError) -> Self {
        Self::Activation {
            actor_id: actor_id.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn eviction(field: impl Into<String>, source: StoreError) -> Self {
        Self::Eviction {
            field: field.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn garbage_collection(source: StoreError) -> Self {
        Self::GarbageCollection {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn refetch(actor_id: impl Into<String>, source: SessionError) -> Self {
        Self::Refetch {
            actor_id: actor_id.into(),
            source: Box::new(source),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Whether this error is recoverable via retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage { source, .. } => source.is_transient(),
            Self::Transport { source, .. } => source.is_transient(),
            Self::Refetch { source, .. } => source.is_transient(),
            _ => false,
        }
    }
}

impl From<StoreError> for SessionError {
    #[track_caller]
    fn from(source: StoreError) -> Self {
        Self::Storage {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<TransportError> for SessionError {
    #[track_caller]
    fn from(source: TransportError) -> Self {
        Self::Transport {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, SessionError>;
