mod actor;
mod actor_type;
mod cache_key;
mod identity_set;
