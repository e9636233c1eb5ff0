use crate::{ConfigError, ConfigErrorResult};

use std::collections::HashSet;

use serde::Deserialize;

pub const DEFAULT_CURRENT_ACTOR_FIELD: &str = "currentActor";
pub const DEFAULT_ACTOR_SCOPED_FIELDS: [&str; 2] = ["loggedPerson", "conversations"];
pub const DEFAULT_REFETCH_ENABLED: bool = true;
pub const DEFAULT_REFETCH_DOCUMENT: &str = "query LoggedPersonConversations($actorId: ID) { \
loggedPerson { id conversations(actorId: $actorId) { total elements { id unread lastComment { id } } } } }";
pub const DEFAULT_REFETCH_ROOT_FIELDS: [&str; 1] = ["loggedPerson"];

/// Actor switch behaviour.
///
/// `actor_scoped_fields` are the query-root fields whose data only makes
/// sense for the actor that fetched them. They are evicted by name on every
/// switch; nested objects are left to garbage collection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub current_actor_field: String,
    pub actor_scoped_fields: Vec<String>,
    pub refetch_enabled: bool,
    pub refetch_document: String,
    pub refetch_root_fields: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            current_actor_field: String::from(DEFAULT_CURRENT_ACTOR_FIELD),
            actor_scoped_fields: DEFAULT_ACTOR_SCOPED_FIELDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            refetch_enabled: DEFAULT_REFETCH_ENABLED,
            refetch_document: String::from(DEFAULT_REFETCH_DOCUMENT),
            refetch_root_fields: DEFAULT_REFETCH_ROOT_FIELDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.current_actor_field.trim().is_empty() {
            return Err(ConfigError::session(
                "session.current_actor_field cannot be empty",
            ));
        }

        if self.actor_scoped_fields.is_empty() {
            return Err(ConfigError::session(
                "session.actor_scoped_fields must name at least one field",
            ));
        }

        let mut seen = HashSet::new();
        for field in &self.actor_scoped_fields {
            if field.trim().is_empty() {
                return Err(ConfigError::session(
                    "session.actor_scoped_fields cannot contain empty names",
                ));
            }
            if field == &self.current_actor_field {
                return Err(ConfigError::session(format!(
                    "session.actor_scoped_fields cannot contain the current actor field '{field}'"
                )));
            }
            if !seen.insert(field.as_str()) {
                return Err(ConfigError::session(format!(
                    "session.actor_scoped_fields contains duplicate '{field}'"
                )));
            }
        }

        if self.refetch_enabled {
            if self.refetch_document.trim().is_empty() {
                return Err(ConfigError::session(
                    "session.refetch_document cannot be empty when refetch is enabled",
                ));
            }
            if self.refetch_root_fields.is_empty() {
                return Err(ConfigError::session(
                    "session.refetch_root_fields must name at least one field when refetch is enabled",
                ));
            }
        }

        Ok(())
    }
}
