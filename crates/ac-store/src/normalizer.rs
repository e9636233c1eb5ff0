use ac_core::{CacheKey, CachedObject, KeyPolicy, REF_FIELD};

use std::collections::HashMap;

use serde_json::{Map, Value};

pub(crate) type Entities = HashMap<CacheKey, Map<String, Value>>;

pub(crate) fn reference(key: &CacheKey) -> Value {
    let mut fields = Map::with_capacity(1);
    fields.insert(REF_FIELD.to_string(), Value::String(key.to_string()));
    Value::Object(fields)
}

/// Key of a `{"__ref": "..."}` object.
pub(crate) fn reference_key(fields: &Map<String, Value>) -> Option<CacheKey> {
    if fields.len() != 1 {
        return None;
    }
    match fields.get(REF_FIELD) {
        Some(Value::String(key)) => CacheKey::new(key.as_str()),
        _ => None,
    }
}

/// Flattens every identifiable object in `value` into `entities` and
/// returns `value` with those objects replaced by references.
///
/// Incoming fields overwrite existing ones; fields the response did not
/// select are kept.
pub(crate) fn normalize<P: KeyPolicy + ?Sized>(
    policy: &P,
    value: Value,
    entities: &mut Entities,
) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| normalize(policy, item, entities))
                .collect(),
        ),
        Value::Object(fields) => {
            if reference_key(&fields).is_some() {
                return Value::Object(fields);
            }

            let normalized = normalize_fields(policy, fields, entities);

            match CachedObject::try_from_fields(normalized) {
                Ok(object) => match policy.data_id(&object) {
                    Some(key) => {
                        merge_entity(entities, &key, object.into_fields());
                        reference(&key)
                    }
                    None => Value::Object(object.into_fields()),
                },
                Err(untyped) => Value::Object(untyped),
            }
        }
        other => other,
    }
}

pub(crate) fn normalize_fields<P: KeyPolicy + ?Sized>(
    policy: &P,
    fields: Map<String, Value>,
    entities: &mut Entities,
) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(name, child)| (name, normalize(policy, child, entities)))
        .collect()
}

pub(crate) fn merge_entity(entities: &mut Entities, key: &CacheKey, fields: Map<String, Value>) {
    entities.entry(key.clone()).or_default().extend(fields);
}

/// Resolves references back into nested objects.
///
/// Dangling references read as `null`. A key already being expanded on the
/// current path is left as a reference.
pub(crate) fn denormalize(value: &Value, entities: &Entities, path: &mut Vec<CacheKey>) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| denormalize(item, entities, path))
                .collect(),
        ),
        Value::Object(fields) => match reference_key(fields) {
            Some(key) => {
                if path.contains(&key) {
                    return value.clone();
                }
                match entities.get(&key) {
                    Some(entity) => {
                        path.push(key);
                        let expanded = denormalize_fields(entity, entities, path);
                        path.pop();
                        Value::Object(expanded)
                    }
                    None => Value::Null,
                }
            }
            None => Value::Object(denormalize_fields(fields, entities, path)),
        },
        other => other.clone(),
    }
}

pub(crate) fn denormalize_fields(
    fields: &Map<String, Value>,
    entities: &Entities,
    path: &mut Vec<CacheKey>,
) -> Map<String, Value> {
    fields
        .iter()
        .map(|(name, child)| (name.clone(), denormalize(child, entities, path)))
        .collect()
}

/// Pushes every key referenced anywhere inside `value`.
pub(crate) fn collect_references(value: &Value, out: &mut Vec<CacheKey>) {
    match value {
        Value::Array(items) => items.iter().for_each(|item| collect_references(item, out)),
        Value::Object(fields) => match reference_key(fields) {
            Some(key) => out.push(key),
            None => fields
                .values()
                .for_each(|child| collect_references(child, out)),
        },
        _ => {}
    }
}
