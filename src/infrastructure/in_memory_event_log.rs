use crate::domain::event::EventEnvelope;
use crate::infrastructure::event_consumer::handle_payload;
use crate::infrastructure::message_publisher::{
    EnvelopeHandler, EventLog, EventLogError, EventPublisher,
};
use crate::infrastructure::shutdown::Shutdown;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;
use uuid::Uuid;

#[derive(Default)]
struct LogState {
    streams: HashMap<String, Vec<Vec<u8>>>,
    offsets: HashMap<(String, String), usize>,
}

/// Append-only log kept in process memory. Each consumer group owns a cursor per stream,
/// so groups read independently and a restarted subscription resumes where it stopped.
#[derive(Default)]
pub struct InMemoryEventLog {
    state: Mutex<LogState>,
    appended: Notify,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends raw bytes without going through envelope serialization.
    pub fn append_raw(&self, stream: &str, payload: Vec<u8>) -> Result<(), EventLogError> {
        self.lock()?
            .streams
            .entry(stream.to_string())
            .or_default()
            .push(payload);
        self.appended.notify_waiters();

        Ok(())
    }

    pub fn envelopes(&self, stream: &str) -> Vec<EventEnvelope> {
        let Ok(state) = self.lock() else {
            return vec![];
        };

        state
            .streams
            .get(stream)
            .map(|messages| {
                messages
                    .iter()
                    .filter_map(|payload| serde_json::from_slice(payload).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn offset(&self, stream: &str, group: &str) -> usize {
        self.lock()
            .ok()
            .and_then(|state| {
                state
                    .offsets
                    .get(&(stream.to_string(), group.to_string()))
                    .copied()
            })
            .unwrap_or_default()
    }

    async fn read(
        &self,
        stream: &str,
        group: &str,
        handler: Arc<dyn EnvelopeHandler>,
        shutdown: Shutdown,
    ) -> Result<(), EventLogError> {
        loop {
            if let Some(reason) = shutdown.reason() {
                return Err(EventLogError::Cancelled(reason));
            }

            let appended = self.appended.notified();
            tokio::pin!(appended);
            appended.as_mut().enable();

            match self.next_message(stream, group)? {
                Some(payload) => {
                    handle_payload(stream, &payload, handler.as_ref());
                }
                None => {
                    tokio::select! {
                        reason = shutdown.cancelled() => {
                            return Err(EventLogError::Cancelled(reason));
                        }
                        _ = &mut appended => {}
                    }
                }
            }
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, LogState>, EventLogError> {
        self.state
            .lock()
            .map_err(|_| EventLogError::SubscribeFailed("event log lock poisoned".to_string()))
    }

    fn next_message(&self, stream: &str, group: &str) -> Result<Option<Vec<u8>>, EventLogError> {
        let mut state = self.lock()?;
        let cursor = (stream.to_string(), group.to_string());
        let offset = state.offsets.get(&cursor).copied().unwrap_or_default();

        let message = state
            .streams
            .get(stream)
            .and_then(|messages| messages.get(offset))
            .cloned();

        if message.is_some() {
            state.offsets.insert(cursor, offset + 1);
        }

        Ok(message)
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventLog {
    async fn append(&self, stream: &str, envelope: &EventEnvelope) -> Result<(), EventLogError> {
        let payload = serde_json::to_vec(envelope)?;

        self.append_raw(stream, payload)
            .map_err(|e| EventLogError::PublishFailed(e.to_string()))
    }
}

#[async_trait]
impl EventLog for InMemoryEventLog {
    async fn provision(&self, streams: &[&str]) -> Result<(), EventLogError> {
        let mut state = self.lock()?;

        for stream in streams {
            state.streams.entry(stream.to_string()).or_default();
        }

        Ok(())
    }

    async fn provision_group(&self, stream: &str, group: &str) -> Result<(), EventLogError> {
        let mut state = self.lock()?;

        state.streams.entry(stream.to_string()).or_default();
        state
            .offsets
            .entry((stream.to_string(), group.to_string()))
            .or_default();

        Ok(())
    }

    async fn subscribe(
        &self,
        stream: &str,
        group: &str,
        handler: Arc<dyn EnvelopeHandler>,
        shutdown: Shutdown,
    ) -> Result<(), EventLogError> {
        tracing::info!(stream = stream, group = group, "Subscribed to in-memory stream");

        self.read(stream, group, handler, shutdown).await
    }

    async fn subscribe_transient(
        &self,
        stream: &str,
        handler: Arc<dyn EnvelopeHandler>,
        shutdown: Shutdown,
    ) -> Result<(), EventLogError> {
        let group = format!("transient-{}", Uuid::new_v4());
        {
            let mut state = self.lock()?;
            let end = state.streams.get(stream).map(Vec::len).unwrap_or_default();
            state
                .offsets
                .insert((stream.to_string(), group.clone()), end);
        }
        tracing::info!(stream = stream, group = group.as_str(), "Subscribed to in-memory stream");

        let result = self.read(stream, &group, handler, shutdown).await;

        if let Ok(mut state) = self.lock() {
            state.offsets.remove(&(stream.to_string(), group));
        }

        result
    }
}
