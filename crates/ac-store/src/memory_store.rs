use crate::normalizer::{
    Entities, collect_references, denormalize, denormalize_fields, merge_entity, normalize,
    normalize_fields,
};
use crate::{NormalizedStore, StoreError, StoreResult};

use ac_core::{CacheIdentityResolver, CacheKey, KeyPolicy};

use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;
use serde_json::{Map, Value};

/// Process-local normalized store.
pub struct InMemoryStore<P = CacheIdentityResolver> {
    policy: P,
    inner: RwLock<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    entities: Entities,
    root: Map<String, Value>,
}

impl<P: KeyPolicy> InMemoryStore<P> {
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            inner: RwLock::new(StoreInner::default()),
        }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    #[track_caller]
    fn read_inner(&self, operation: &'static str) -> StoreResult<RwLockReadGuard<'_, StoreInner>> {
        self.inner
            .read()
            .map_err(|_| StoreError::poisoned(operation))
    }

    #[track_caller]
    fn write_inner(
        &self,
        operation: &'static str,
    ) -> StoreResult<RwLockWriteGuard<'_, StoreInner>> {
        self.inner
            .write()
            .map_err(|_| StoreError::poisoned(operation))
    }
}

impl Default for InMemoryStore<CacheIdentityResolver> {
    fn default() -> Self {
        Self::new(CacheIdentityResolver::default())
    }
}

impl<P: KeyPolicy> NormalizedStore for InMemoryStore<P> {
    fn write(&self, key: &CacheKey, fields: Map<String, Value>) -> StoreResult<()> {
        let mut inner = self.write_inner("writing an entity")?;
        let normalized = normalize_fields(&self.policy, fields, &mut inner.entities);
        merge_entity(&mut inner.entities, key, normalized);
        Ok(())
    }

    fn read(&self, key: &CacheKey) -> StoreResult<Option<Value>> {
        let inner = self.read_inner("reading an entity")?;
        Ok(inner.entities.get(key).map(|entity| {
            let mut path = vec![key.clone()];
            Value::Object(denormalize_fields(entity, &inner.entities, &mut path))
        }))
    }

    fn write_root_field(&self, field: &str, value: Value) -> StoreResult<()> {
        let mut inner = self.write_inner("writing a root field")?;
        let normalized = normalize(&self.policy, value, &mut inner.entities);
        inner.root.insert(field.to_string(), normalized);
        Ok(())
    }

    fn read_root_field(&self, field: &str) -> StoreResult<Option<Value>> {
        let inner = self.read_inner("reading a root field")?;
        Ok(inner
            .root
            .get(field)
            .map(|value| denormalize(value, &inner.entities, &mut Vec::new())))
    }

    fn evict(&self, field_name: &str) -> StoreResult<bool> {
        let mut inner = self.write_inner("evicting a root field")?;
        let removed = inner.root.remove(field_name).is_some();
        debug!("Evict root field '{field_name}': removed={removed}");
        Ok(removed)
    }

    fn gc(&self) -> StoreResult<Vec<CacheKey>> {
        let mut inner = self.write_inner("collecting garbage")?;

        let mut pending = Vec::new();
        for value in inner.root.values() {
            collect_references(value, &mut pending);
        }

        let mut reachable = HashSet::new();
        while let Some(key) = pending.pop() {
            if !reachable.insert(key.clone()) {
                continue;
            }
            if let Some(entity) = inner.entities.get(&key) {
                for child in entity.values() {
                    collect_references(child, &mut pending);
                }
            }
        }

        let mut removed: Vec<CacheKey> = inner
            .entities
            .keys()
            .filter(|key| !reachable.contains(*key))
            .cloned()
            .collect();
        inner.entities.retain(|key, _| reachable.contains(key));
        removed.sort();

        debug!(
            "Garbage collection removed {} entities ({} remaining)",
            removed.len(),
            inner.entities.len()
        );
        Ok(removed)
    }

    fn contains(&self, key: &CacheKey) -> StoreResult<bool> {
        let inner = self.read_inner("looking up an entity")?;
        Ok(inner.entities.contains_key(key))
    }

    fn entity_count(&self) -> StoreResult<usize> {
        let inner = self.read_inner("counting entities")?;
        Ok(inner.entities.len())
    }

    fn root_fields(&self) -> StoreResult<Vec<String>> {
        let inner = self.read_inner("listing root fields")?;
        let mut fields: Vec<String> = inner.root.keys().cloned().collect();
        fields.sort();
        Ok(fields)
    }
}
