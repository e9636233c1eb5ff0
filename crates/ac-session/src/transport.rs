use crate::{QueryRequest, TransportError};

use async_trait::async_trait;
use serde_json::Value;

/// Executes GraphQL operations against the server.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Runs `request` and returns the response `data` object.
    async fn execute(&self, request: &QueryRequest) -> Result<Value, TransportError>;
}
