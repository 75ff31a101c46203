use crate::domain_model::*;

/// Storage key for the bearer access token.
pub const ACCESS_TOKEN_KEY: &str = "token";
/// Storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Storage key for the serialized session snapshot.
pub const SESSION_KEY: &str = "auth";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(String),
    #[error("store data malformed: {0}")]
    Malformed(String),
}

/// Durable client-side string storage, the localStorage analog. Values are
/// read on every request and must survive process restart.
#[async_trait::async_trait]
pub trait LocalStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Best-effort read of the stored access token; store failures degrade to
/// an unauthenticated request rather than blocking it.
pub async fn stored_access_token(store: &dyn LocalStore) -> Option<AccessToken> {
    match store.get(ACCESS_TOKEN_KEY).await {
        Ok(value) => value.map(AccessToken),
        Err(e) => {
            tracing::warn!("failed to read access token from store: {e}");
            None
        }
    }
}
