pub mod error;
pub mod key_resolver;
pub mod models;
pub mod username;

pub use error::{CoreError, Result as CoreResult};
pub use key_resolver::{CacheIdentityResolver, KeyPolicy};
pub use models::actor::Actor;
pub use models::actor_type::ActorType;
pub use models::cache_key::CacheKey;
pub use models::cached_object::CachedObject;
pub use models::identity_set::IdentitySet;
pub use models::key_resolution::KeyResolution;
pub use models::media::Media;
pub use username::{auto_update_username, convert_to_username, validate_username};

#[cfg(test)]
mod tests;

/// Field carrying the type discriminator on every server object.
pub const TYPENAME_FIELD: &str = "__typename";

/// Field marking a normalized reference to another cache entry.
pub const REF_FIELD: &str = "__ref";

pub const DEFAULT_LOCATION_TYPENAME: &str = "Address";
pub const DEFAULT_MEDIA_TYPENAME: &str = "Media";
