use crate::domain::session::{SessionStore, SessionStoreError, session_key};
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::time::Duration;

#[derive(Clone)]
pub struct RedisSessionStore {
    connection: ConnectionManager,
}

impl RedisSessionStore {
    pub async fn connect(redis_url: &str) -> Result<Self, SessionStoreError> {
        let client = redis::Client::open(redis_url).map_err(unavailable)?;
        let connection = ConnectionManager::new(client).await.map_err(unavailable)?;

        Ok(RedisSessionStore { connection })
    }
}

fn unavailable(error: redis::RedisError) -> SessionStoreError {
    tracing::error!("Session store failure: {:?}", error);

    SessionStoreError::Unavailable(error.to_string())
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn put(
        &self,
        subject_id: i64,
        token: &str,
        ttl: Duration,
    ) -> Result<(), SessionStoreError> {
        let mut connection = self.connection.clone();

        connection
            .set_ex::<_, _, ()>(session_key(subject_id), token, ttl.as_secs().max(1))
            .await
            .map_err(unavailable)
    }

    async fn get(&self, subject_id: i64) -> Result<Option<String>, SessionStoreError> {
        let mut connection = self.connection.clone();

        connection
            .get::<_, Option<String>>(session_key(subject_id))
            .await
            .map_err(unavailable)
    }

    async fn exists(&self, subject_id: i64) -> Result<bool, SessionStoreError> {
        let mut connection = self.connection.clone();

        connection
            .exists::<_, bool>(session_key(subject_id))
            .await
            .map_err(unavailable)
    }

    async fn delete(&self, subject_id: i64) -> Result<(), SessionStoreError> {
        let mut connection = self.connection.clone();

        connection
            .del::<_, ()>(session_key(subject_id))
            .await
            .map_err(unavailable)
    }
}
