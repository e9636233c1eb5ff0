use crate::FetchPolicy;

use serde_json::{Map, Value, json};

/// A GraphQL operation plus the cache metadata needed to answer it.
///
/// `root_fields` names the query-root fields the document selects. The
/// client does not parse documents, so cache reads rely on this list.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub document: String,
    pub variables: Map<String, Value>,
    pub fetch_policy: FetchPolicy,
    pub root_fields: Vec<String>,
}

impl QueryRequest {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            variables: Map::new(),
            fetch_policy: FetchPolicy::default(),
            root_fields: Vec::new(),
        }
    }

    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn with_fetch_policy(mut self, fetch_policy: FetchPolicy) -> Self {
        self.fetch_policy = fetch_policy;
        self
    }

    pub fn with_root_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.root_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// HTTP body: `{"query": ..., "variables": {...}}`.
    pub fn body(&self) -> Value {
        json!({
            "query": self.document,
            "variables": self.variables,
        })
    }
}
