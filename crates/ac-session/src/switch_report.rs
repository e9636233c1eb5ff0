use ac_core::CacheKey;

use std::fmt;

use serde::Serialize;

/// Outcome of the actor-scoped refetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum RefetchStatus {
    /// Response written into the store.
    Completed,
    /// A newer switch began; the response was discarded.
    Superseded,
    Disabled,
    Failed(String),
}

impl RefetchStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for RefetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("completed"),
            Self::Superseded => f.write_str("superseded"),
            Self::Disabled => f.write_str("disabled"),
            Self::Failed(message) => write!(f, "failed: {message}"),
        }
    }
}

/// What a completed switch did.
///
/// `warnings` holds cache hygiene failures that were logged and swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchReport {
    pub actor_id: String,
    pub generation: u64,
    pub persisted: bool,
    pub evicted: Vec<String>,
    pub collected: Vec<CacheKey>,
    pub refetch: RefetchStatus,
    pub superseded: bool,
    pub warnings: Vec<String>,
}

impl SwitchReport {
    pub(crate) fn new(actor_id: impl Into<String>, generation: u64) -> Self {
        Self {
            actor_id: actor_id.into(),
            generation,
            persisted: false,
            evicted: Vec::new(),
            collected: Vec::new(),
            refetch: RefetchStatus::Disabled,
            superseded: false,
            warnings: Vec::new(),
        }
    }
}
