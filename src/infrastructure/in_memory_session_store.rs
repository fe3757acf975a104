use crate::domain::session::{SessionStore, SessionStoreError, session_key};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Process-local session store. Entries expire lazily on read.
#[derive(Default)]
pub struct InMemorySessionStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned<T>(_: T) -> SessionStoreError {
        SessionStoreError::Unavailable("session store lock poisoned".to_string())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(
        &self,
        subject_id: i64,
        token: &str,
        ttl: Duration,
    ) -> Result<(), SessionStoreError> {
        let mut entries = self.entries.lock().map_err(Self::poisoned)?;
        entries.insert(
            session_key(subject_id),
            (token.to_string(), Instant::now() + ttl),
        );

        Ok(())
    }

    async fn get(&self, subject_id: i64) -> Result<Option<String>, SessionStoreError> {
        let mut entries = self.entries.lock().map_err(Self::poisoned)?;
        let key = session_key(subject_id);

        match entries.get(&key) {
            Some((token, expires_at)) if *expires_at > Instant::now() => Ok(Some(token.clone())),
            Some(_) => {
                entries.remove(&key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn exists(&self, subject_id: i64) -> Result<bool, SessionStoreError> {
        Ok(self.get(subject_id).await?.is_some())
    }

    async fn delete(&self, subject_id: i64) -> Result<(), SessionStoreError> {
        let mut entries = self.entries.lock().map_err(Self::poisoned)?;
        entries.remove(&session_key(subject_id));

        Ok(())
    }
}
