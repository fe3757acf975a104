use crate::domain::event::{EventKind, EventStreams};
use crate::infrastructure::message_publisher::{EventLogError, EventPublisher, NullPublisher};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

pub const SERVICE_NAME: &str = "admin-service";
pub const DEFAULT_OUTBOX_CAPACITY: usize = 1024;

struct OutgoingEvent {
    stream: String,
    kind: EventKind,
    data: Map<String, Value>,
}

/// Typed front for the event publisher. Every helper except [`EventEmitter::send_system_info`]
/// is fire-and-forget: events are queued to a single publishing task, which appends them in
/// the order they were emitted. A failed publish is only logged.
#[derive(Clone)]
pub struct EventEmitter {
    publisher: Arc<dyn EventPublisher>,
    streams: EventStreams,
    outbox: Option<mpsc::Sender<OutgoingEvent>>,
}

impl EventEmitter {
    /// Must be called from within a tokio runtime when `publisher` is enabled.
    pub fn new(publisher: Arc<dyn EventPublisher>, streams: EventStreams) -> Self {
        EventEmitter::with_capacity(publisher, streams, DEFAULT_OUTBOX_CAPACITY)
    }

    pub fn with_capacity(
        publisher: Arc<dyn EventPublisher>,
        streams: EventStreams,
        capacity: usize,
    ) -> Self {
        let outbox = publisher.is_enabled().then(|| {
            let (sender, receiver) = mpsc::channel(capacity.max(1));
            tokio::spawn(run_outbox(publisher.clone(), receiver));

            sender
        });

        EventEmitter {
            publisher,
            streams,
            outbox,
        }
    }

    pub fn disabled() -> Self {
        EventEmitter::new(Arc::new(NullPublisher {}), EventStreams::default())
    }

    pub fn is_enabled(&self) -> bool {
        self.publisher.is_enabled()
    }

    pub fn streams(&self) -> &EventStreams {
        &self.streams
    }

    pub fn user_login(&self, user_id: i64, username: &str, ip: &str) {
        self.emit(
            EventKind::UserLogin,
            json!({"user_id": user_id, "username": username, "ip": ip, "action": "login"}),
        );
    }

    pub fn user_logout(&self, user_id: i64, username: &str) {
        self.emit(
            EventKind::UserLogout,
            json!({"user_id": user_id, "username": username, "action": "logout"}),
        );
    }

    pub fn user_register(&self, user_id: i64, username: &str, email: &str) {
        self.emit(
            EventKind::UserRegister,
            json!({
                "user_id": user_id,
                "username": username,
                "email": email,
                "action": "register",
            }),
        );
    }

    pub fn user_update(&self, user_id: i64, username: &str, fields: Map<String, Value>) {
        self.emit(
            EventKind::UserUpdate,
            json!({
                "user_id": user_id,
                "username": username,
                "action": "update",
                "fields": fields,
            }),
        );
    }

    pub fn user_delete(&self, user_id: i64, username: &str) {
        self.emit(
            EventKind::UserDelete,
            json!({"user_id": user_id, "username": username, "action": "delete"}),
        );
    }

    pub fn system_info(&self, message: &str, details: Value) {
        self.emit(EventKind::SystemInfo, system_info_data(message, details));
    }

    pub fn system_error(&self, error: &str, details: Value) {
        self.emit(
            EventKind::SystemError,
            json!({
                "service": SERVICE_NAME,
                "error": error,
                "details": details,
                "level": "error",
            }),
        );
    }

    /// Publishes a `system_info` event and waits for the outcome.
    pub async fn send_system_info(
        &self,
        message: &str,
        details: Value,
    ) -> Result<(), EventLogError> {
        let kind = EventKind::SystemInfo;

        self.publisher
            .publish(
                self.streams.name(kind.stream()),
                kind.as_str(),
                into_map(system_info_data(message, details)),
            )
            .await
    }

    fn emit(&self, kind: EventKind, data: Value) {
        let Some(outbox) = &self.outbox else {
            return;
        };

        let event = OutgoingEvent {
            stream: self.streams.name(kind.stream()).to_string(),
            kind,
            data: into_map(data),
        };

        match outbox.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                tracing::warn!(
                    stream = event.stream.as_str(),
                    "Event outbox is full, dropping {} event",
                    event.kind.as_str()
                );
            }
            Err(TrySendError::Closed(event)) => {
                tracing::warn!(
                    stream = event.stream.as_str(),
                    "Event outbox is closed, dropping {} event",
                    event.kind.as_str()
                );
            }
        }
    }
}

async fn run_outbox(
    publisher: Arc<dyn EventPublisher>,
    mut receiver: mpsc::Receiver<OutgoingEvent>,
) {
    while let Some(event) = receiver.recv().await {
        if let Err(e) = publisher
            .publish(&event.stream, event.kind.as_str(), event.data)
            .await
        {
            tracing::warn!(
                stream = event.stream.as_str(),
                "Failed to publish {} event: {}",
                event.kind.as_str(),
                e
            );
        }
    }

    tracing::debug!("Event outbox closed");
}

fn system_info_data(message: &str, details: Value) -> Value {
    json!({
        "service": SERVICE_NAME,
        "message": message,
        "details": details,
        "level": "info",
    })
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}
