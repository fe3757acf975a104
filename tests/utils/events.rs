use admin_service::domain::event::EventEnvelope;
use admin_service::infrastructure::in_memory_event_log::InMemoryEventLog;
use admin_service::infrastructure::message_publisher::{
    EnvelopeHandler, EventLogError, EventPublisher, HandlerError,
};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Remembers every envelope it sees. Fails on the configured event type, after recording it.
#[derive(Default)]
pub struct RecordingHandler {
    seen: Mutex<Vec<EventEnvelope>>,
    fail_on: Option<String>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(event_type: &str) -> Self {
        RecordingHandler {
            seen: Mutex::new(vec![]),
            fail_on: Some(event_type.to_string()),
        }
    }

    pub fn seen(&self) -> Vec<EventEnvelope> {
        self.seen.lock().unwrap().clone()
    }

    pub fn seen_types(&self) -> Vec<String> {
        self.seen()
            .into_iter()
            .map(|envelope| envelope.event_type)
            .collect()
    }

    pub fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

impl EnvelopeHandler for RecordingHandler {
    fn handle(&self, envelope: &EventEnvelope) -> Result<(), HandlerError> {
        self.seen.lock().unwrap().push(envelope.clone());

        match &self.fail_on {
            Some(event_type) if *event_type == envelope.event_type => {
                Err(format!("refusing {}", event_type).into())
            }
            _ => Ok(()),
        }
    }
}

/// Publisher that is enabled but never reaches its backend.
#[derive(Default)]
pub struct FailingPublisher {}

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn append(&self, stream: &str, _envelope: &EventEnvelope) -> Result<(), EventLogError> {
        Err(EventLogError::PublishFailed(format!(
            "backend for {} is down",
            stream
        )))
    }
}

pub async fn wait_until(timeout_ms: u64, condition: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_millis(timeout_ms);

    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        sleep(Duration::from_millis(10)).await;
    }

    condition()
}

pub async fn wait_for_event(
    log: &InMemoryEventLog,
    stream: &str,
    timeout_ms: u64,
    predicate: impl Fn(&EventEnvelope) -> bool,
) -> Option<EventEnvelope> {
    let deadline = Instant::now() + Duration::from_millis(timeout_ms);

    loop {
        if let Some(envelope) = log.envelopes(stream).into_iter().find(|e| predicate(e)) {
            return Some(envelope);
        }
        if Instant::now() >= deadline {
            println!("Timeout waiting for event on {}", stream);
            return None;
        }
        sleep(Duration::from_millis(10)).await;
    }
}

/// Publisher that records appended envelopes and stalls on its first append.
pub struct StallingPublisher {
    stall: Duration,
    appended: Mutex<Vec<EventEnvelope>>,
    calls: std::sync::atomic::AtomicUsize,
}

impl StallingPublisher {
    pub fn new(stall: Duration) -> Self {
        StallingPublisher {
            stall,
            appended: Mutex::new(vec![]),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn appended(&self) -> Vec<EventEnvelope> {
        self.appended.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for StallingPublisher {
    async fn append(&self, _stream: &str, envelope: &EventEnvelope) -> Result<(), EventLogError> {
        let call = self
            .calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if call == 0 {
            sleep(self.stall).await;
        }
        self.appended.lock().unwrap().push(envelope.clone());

        Ok(())
    }
}
