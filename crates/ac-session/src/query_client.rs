use crate::{FetchPolicy, QueryRequest, SessionResult, Transport, TransportError};

use ac_store::NormalizedStore;

use std::sync::Arc;

use log::debug;
use serde_json::{Map, Value};

/// Answers queries from the normalized store or the network.
#[derive(Clone)]
pub struct QueryClient {
    store: Arc<dyn NormalizedStore>,
    transport: Arc<dyn Transport>,
}

impl QueryClient {
    pub fn new(store: Arc<dyn NormalizedStore>, transport: Arc<dyn Transport>) -> Self {
        Self { store, transport }
    }

    pub fn store(&self) -> &Arc<dyn NormalizedStore> {
        &self.store
    }

    /// Runs `request` according to its fetch policy.
    pub async fn query(&self, request: &QueryRequest) -> SessionResult<Value> {
        match request.fetch_policy {
            FetchPolicy::CacheOnly => {
                let (data, _) = self.read_cached(&request.root_fields)?;
                Ok(Value::Object(data))
            }
            FetchPolicy::CacheFirst => {
                let (data, complete) = self.read_cached(&request.root_fields)?;
                if complete {
                    debug!("Cache hit for {:?}", request.root_fields);
                    return Ok(Value::Object(data));
                }
                self.fetch_and_write(request).await
            }
            FetchPolicy::NetworkOnly => self.fetch_and_write(request).await,
        }
    }

    /// Network round trip without touching the store.
    pub async fn fetch(&self, request: &QueryRequest) -> SessionResult<Value> {
        debug!(
            "Fetching {:?} ({})",
            request.root_fields, request.fetch_policy
        );
        let data = self.transport.execute(request).await?;
        if !data.is_object() {
            return Err(TransportError::decode("response data is not an object").into());
        }
        Ok(data)
    }

    /// Writes every top-level field of `data` under the store root.
    ///
    /// Returns the written field names.
    pub fn write_data(&self, data: &Value) -> SessionResult<Vec<String>> {
        let Value::Object(fields) = data else {
            return Err(TransportError::decode("response data is not an object").into());
        };

        let mut written = Vec::with_capacity(fields.len());
        for (name, value) in fields {
            self.store.write_root_field(name, value.clone())?;
            written.push(name.clone());
        }
        Ok(written)
    }

    async fn fetch_and_write(&self, request: &QueryRequest) -> SessionResult<Value> {
        let data = self.fetch(request).await?;
        self.write_data(&data)?;
        Ok(data)
    }

    /// Reads the declared root fields. Missing ones read as `null`; the flag
    /// is true only when at least one field was declared and all were present.
    fn read_cached(&self, root_fields: &[String]) -> SessionResult<(Map<String, Value>, bool)> {
        let mut data = Map::with_capacity(root_fields.len());
        let mut complete = !root_fields.is_empty();

        for field in root_fields {
            match self.store.read_root_field(field)? {
                Some(value) => {
                    data.insert(field.clone(), value);
                }
                None => {
                    complete = false;
                    data.insert(field.clone(), Value::Null);
                }
            }
        }

        Ok((data, complete))
    }
}
