use crate::{ActorType, Media, TYPENAME_FIELD};

use serde::{Deserialize, Serialize};
use serde_json::Value;

const UNDEFINED_NAME: &str = "undefined";

/// A persona the authenticated principal can act as.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub preferred_username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub suspended: bool,
    #[serde(rename = "type", default)]
    pub actor_type: ActorType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Media>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<Media>,
}

impl Actor {
    /// Minimal actor carrying only an identifier.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// The identifier, if present and non-empty.
    pub fn valid_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// `user@domain` for remote actors, `user` for local ones.
    ///
    /// With `force_host`, local actors are qualified with that host instead.
    pub fn username_with_domain(&self, force_host: Option<&str>) -> String {
        if self.preferred_username.is_empty() {
            return String::new();
        }

        if let Some(domain) = self.domain.as_deref().filter(|d| !d.is_empty()) {
            return format!("{}@{}", self.preferred_username, domain);
        }

        match force_host {
            Some(host) => format!("{}@{}", self.preferred_username, host),
            None => self.preferred_username.clone(),
        }
    }

    pub fn display_name(&self) -> String {
        if self.has_display_name() {
            self.name.clone()
        } else {
            self.username_with_domain(None)
        }
    }

    pub fn display_name_and_username(&self) -> String {
        if self.has_display_name() && !self.name.trim().is_empty() {
            format!("{} (@{})", self.name, self.username_with_domain(None))
        } else {
            self.username_with_domain(None)
        }
    }

    /// JSON shape written into the cache, including the type discriminator.
    pub fn to_cache_value(&self) -> Value {
        let mut value = serde_json::to_value(self).unwrap_or(Value::Null);
        if let Value::Object(fields) = &mut value {
            fields.insert(
                TYPENAME_FIELD.to_string(),
                Value::String(self.actor_type.typename().to_string()),
            );
        }
        value
    }

    fn has_display_name(&self) -> bool {
        !self.name.is_empty() && self.name != UNDEFINED_NAME
    }
}
