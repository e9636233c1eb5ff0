//! Cache key derivation for server objects.
//!
//! Server objects are not uniformly identified: addresses carry a globally
//! unique origin identifier, media get a UUID late (after upload), and pending
//! media are only known by URL. Everything else uses the store default
//! `<type>:<id>`.

use crate::{
    CacheKey, CachedObject, DEFAULT_LOCATION_TYPENAME, DEFAULT_MEDIA_TYPENAME, KeyResolution,
};

const LOCATION_ORIGIN_FIELD: &str = "origin_id";
const MEDIA_UUID_FIELD: &str = "uuid";
const MEDIA_URL_FIELD: &str = "url";
const ID_FIELDS: [&str; 2] = ["id", "_id"];

/// Chooses cache keys for normalized objects.
///
/// Implementations must be pure: same object in, same answer out.
pub trait KeyPolicy: Send + Sync {
    fn resolve(&self, object: &CachedObject) -> KeyResolution;

    /// Final key for an object: the policy's own key or the default keying.
    ///
    /// `None` means the object cannot be identified and stays embedded in
    /// its parent.
    fn data_id(&self, object: &CachedObject) -> Option<CacheKey> {
        match self.resolve(object) {
            KeyResolution::Key(key) => Some(key),
            KeyResolution::Default => default_key(object),
        }
    }
}

/// Store default keying: `<type>:<id>`, falling back to `<type>:<_id>`.
pub fn default_key(object: &CachedObject) -> Option<CacheKey> {
    ID_FIELDS
        .iter()
        .find_map(|field| object.identifying_field(field))
        .and_then(|id| CacheKey::from_type_and_id(object.typename(), &id))
}

/// Key policy for the location and media families.
#[derive(Debug, Clone)]
pub struct CacheIdentityResolver {
    location_typename: String,
    media_typename: String,
}

impl CacheIdentityResolver {
    pub fn new(location_typename: impl Into<String>, media_typename: impl Into<String>) -> Self {
        Self {
            location_typename: location_typename.into(),
            media_typename: media_typename.into(),
        }
    }

    pub fn location_typename(&self) -> &str {
        &self.location_typename
    }

    pub fn media_typename(&self) -> &str {
        &self.media_typename
    }

    fn resolve_location(&self, object: &CachedObject) -> KeyResolution {
        object
            .identifying_field(LOCATION_ORIGIN_FIELD)
            .and_then(CacheKey::new)
            .into()
    }

    fn resolve_media(&self, object: &CachedObject) -> KeyResolution {
        if let Some(uuid) = object.identifying_field(MEDIA_UUID_FIELD) {
            return CacheKey::new(format!("{}:{uuid}", self.media_typename)).into();
        }

        if let Some(url) = object.identifying_field(MEDIA_URL_FIELD) {
            return CacheKey::new(format!("{}:url:{url}", self.media_typename)).into();
        }

        KeyResolution::Default
    }
}

impl Default for CacheIdentityResolver {
    fn default() -> Self {
        Self::new(DEFAULT_LOCATION_TYPENAME, DEFAULT_MEDIA_TYPENAME)
    }
}

impl KeyPolicy for CacheIdentityResolver {
    fn resolve(&self, object: &CachedObject) -> KeyResolution {
        let typename = object.typename();

        if typename == self.location_typename {
            self.resolve_location(object)
        } else if typename == self.media_typename {
            self.resolve_media(object)
        } else {
            KeyResolution::Default
        }
    }
}
