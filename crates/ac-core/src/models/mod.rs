pub mod actor;
pub mod actor_type;
pub mod cache_key;
pub mod cached_object;
pub mod identity_set;
pub mod key_resolution;
pub mod media;
