use crate::StoreResult;

use async_trait::async_trait;

/// Durable client-side key/value storage.
///
/// Reads and writes may suspend; callers must not hold cache locks across them.
#[async_trait]
pub trait ClientStorage: Send + Sync {
    async fn get_item(&self, name: &str) -> StoreResult<Option<String>>;

    async fn set_item(&self, name: &str, value: &str) -> StoreResult<()>;

    async fn remove_item(&self, name: &str) -> StoreResult<()>;
}

/// Authentication tokens written by the login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Reads the token pair. `None` unless an access token is stored.
pub async fn read_token_pair(
    storage: &dyn ClientStorage,
    access_token_key: &str,
    refresh_token_key: &str,
) -> StoreResult<Option<TokenPair>> {
    let Some(access_token) = storage
        .get_item(access_token_key)
        .await?
        .filter(|token| !token.is_empty())
    else {
        return Ok(None);
    };

    let refresh_token = storage
        .get_item(refresh_token_key)
        .await?
        .filter(|token| !token.is_empty());

    Ok(Some(TokenPair {
        access_token,
        refresh_token,
    }))
}
