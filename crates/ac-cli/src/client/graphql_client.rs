use crate::{CliClientResult, ClientError};

use ac_session::{QueryRequest, Transport, TransportError};
use ac_store::ClientStorage;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client as ReqwestClient;
use serde_json::Value;

/// Where the bearer token comes from.
struct TokenSource {
    storage: Arc<dyn ClientStorage>,
    access_token_key: String,
}

/// HTTP client for the GraphQL endpoint
pub struct GraphqlClient {
    pub endpoint: String,
    client: ReqwestClient,
    tokens: Option<TokenSource>,
}

impl GraphqlClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `endpoint` - GraphQL URL (e.g., "http://127.0.0.1:4000/api")
    /// * `timeout` - Per-request timeout
    pub fn new(endpoint: &str, timeout: Duration) -> CliClientResult<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
            tokens: None,
        })
    }

    /// Send the stored access token as a bearer token on every request.
    pub fn with_token_storage(
        mut self,
        storage: Arc<dyn ClientStorage>,
        access_token_key: impl Into<String>,
    ) -> Self {
        self.tokens = Some(TokenSource {
            storage,
            access_token_key: access_token_key.into(),
        });
        self
    }

    /// POST `request` and return the response `data` object.
    pub async fn post(&self, request: &QueryRequest) -> CliClientResult<Value> {
        let mut req = self.client.post(&self.endpoint).json(&request.body());

        if let Some(token) = self.access_token().await? {
            req = req.bearer_auth(token);
        }

        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|body| first_error_message(&body))
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });
            return Err(ClientError::api_error(status.as_u16().to_string(), message));
        }

        let body: Value = serde_json::from_str(&text)?;

        let messages = error_messages(&body);
        if !messages.is_empty() {
            return Err(ClientError::graphql(messages));
        }

        match body.get("data") {
            Some(data) if data.is_object() => {
                debug!("GraphQL response for {:?} received", request.root_fields);
                Ok(data.clone())
            }
            _ => Err(ClientError::graphql(vec![
                "response carried no data".to_string(),
            ])),
        }
    }
}

impl GraphqlClient {
    /// The stored access token, if any. Empty tokens count as absent.
    async fn access_token(&self) -> CliClientResult<Option<String>> {
        let Some(tokens) = &self.tokens else {
            return Ok(None);
        };
        let token = tokens.storage.get_item(&tokens.access_token_key).await?;
        Ok(token.filter(|token| !token.is_empty()))
    }
}

#[async_trait]
impl Transport for GraphqlClient {
    async fn execute(&self, request: &QueryRequest) -> Result<Value, TransportError> {
        self.post(request).await.map_err(TransportError::from)
    }
}

/// Messages of a GraphQL `errors` array.
fn error_messages(body: &Value) -> Vec<String> {
    body.get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .map(|error| {
                    error
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("Unknown error")
                        .to_string()
                })
                .collect()
        })
        .unwrap_or_default()
}

fn first_error_message(body: &Value) -> Option<String> {
    error_messages(body).into_iter().next()
}
