use crate::TYPENAME_FIELD;

use serde_json::{Map, Value};

/// A server object as seen by the normalizer: a type discriminator plus fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedObject {
    typename: String,
    fields: Map<String, Value>,
}

impl CachedObject {
    /// Builds a cached object from an owned field map.
    ///
    /// Returns `None` unless `__typename` is a non-empty string.
    pub fn from_fields(fields: Map<String, Value>) -> Option<Self> {
        Self::try_from_fields(fields).ok()
    }

    /// Like [`CachedObject::from_fields`] but hands the map back when the
    /// type discriminator is missing.
    pub fn try_from_fields(fields: Map<String, Value>) -> Result<Self, Map<String, Value>> {
        let typename = match fields.get(TYPENAME_FIELD) {
            Some(Value::String(name)) if !name.is_empty() => Some(name.clone()),
            _ => None,
        };
        match typename {
            Some(typename) => Ok(Self { typename, fields }),
            None => Err(fields),
        }
    }

    /// Copies the fields of a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Self::from_fields(fields.clone()),
            _ => None,
        }
    }

    pub fn typename(&self) -> &str {
        &self.typename
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Value of a field usable as (part of) an identity.
    ///
    /// Non-empty strings are returned as-is and numbers in decimal form.
    /// Anything else, including `null` and `""`, counts as absent.
    pub fn identifying_field(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}
