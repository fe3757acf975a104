use crate::application::configuration::cache::CacheConfiguration;
use crate::domain::session::{SessionStore, SessionStoreError};
use crate::infrastructure::in_memory_session_store::InMemorySessionStore;
use crate::infrastructure::redis_session_store::RedisSessionStore;
use std::sync::Arc;

pub async fn create_session_store(
    config: &CacheConfiguration,
) -> Result<Arc<dyn SessionStore>, SessionStoreError> {
    match config {
        CacheConfiguration::Redis(redis_url) => {
            let store = RedisSessionStore::connect(redis_url).await?;
            tracing::info!("Session store: redis");

            Ok(Arc::new(store))
        }
        CacheConfiguration::Memory => {
            tracing::info!("Session store: in-memory");

            Ok(Arc::new(InMemorySessionStore::new()))
        }
    }
}
