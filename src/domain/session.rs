use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Liveness markers for issued tokens, one per subject. The entry, not the token's own
/// expiry, decides whether a session is still honoured. TTL is enforced by the store.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn put(&self, subject_id: i64, token: &str, ttl: Duration)
    -> Result<(), SessionStoreError>;
    async fn get(&self, subject_id: i64) -> Result<Option<String>, SessionStoreError>;
    async fn exists(&self, subject_id: i64) -> Result<bool, SessionStoreError>;
    async fn delete(&self, subject_id: i64) -> Result<(), SessionStoreError>;
}

pub fn session_key(subject_id: i64) -> String {
    format!("token:{}", subject_id)
}
