use crate::StoreResult;

use ac_core::CacheKey;

use serde_json::{Map, Value};

/// Keyed object store with root-field eviction and mark-and-sweep collection.
///
/// All operations are synchronous; implementations never hold their lock
/// across an await.
pub trait NormalizedStore: Send + Sync {
    /// Merges `fields` into the entity at `key`, normalizing nested objects.
    ///
    /// An entity written this way and never referenced from a root field is
    /// reclaimed by the next [`NormalizedStore::gc`].
    fn write(&self, key: &CacheKey, fields: Map<String, Value>) -> StoreResult<()>;

    /// Denormalized entity at `key`.
    fn read(&self, key: &CacheKey) -> StoreResult<Option<Value>>;

    /// Normalizes `value` and stores it under the query root.
    fn write_root_field(&self, field: &str, value: Value) -> StoreResult<()>;

    /// Denormalized value of a root field.
    fn read_root_field(&self, field: &str) -> StoreResult<Option<Value>>;

    /// Removes a root field. Returns whether it was present.
    fn evict(&self, field_name: &str) -> StoreResult<bool>;

    /// Removes every entity unreachable from the root. Returns removed keys, sorted.
    fn gc(&self) -> StoreResult<Vec<CacheKey>>;

    fn contains(&self, key: &CacheKey) -> StoreResult<bool>;

    fn entity_count(&self) -> StoreResult<usize>;

    /// Root field names, sorted.
    fn root_fields(&self) -> StoreResult<Vec<String>>;
}
