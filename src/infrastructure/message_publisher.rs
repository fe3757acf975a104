use crate::application::configuration::messaging::MessagingConfiguration;
use crate::domain::event::EventEnvelope;
use crate::infrastructure::in_memory_event_log::InMemoryEventLog;
use crate::infrastructure::rabbitmq_event_log::RabbitmqEventLog;
use crate::infrastructure::shutdown::Shutdown;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use thiserror::Error;

pub type HandlerError = Box<dyn Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum EventLogError {
    #[error("Publish failed: {0}")]
    PublishFailed(String),
    #[error("Envelope serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Subscribe failed: {0}")]
    SubscribeFailed(String),
    #[error("Stream provisioning failed: {0}")]
    Provisioning(String),
    #[error("Subscription cancelled: {0}")]
    Cancelled(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessagingEngine {
    #[default]
    Rabbitmq,
    Memory,
    None,
}

impl MessagingEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessagingEngine::Rabbitmq => "rabbitmq",
            MessagingEngine::Memory => "memory",
            MessagingEngine::None => "none",
        }
    }
}

impl Display for MessagingEngine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for MessagingEngine {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "rabbitmq" => Ok(MessagingEngine::Rabbitmq),
            "memory" => Ok(MessagingEngine::Memory),
            "none" => Ok(MessagingEngine::None),
            _ => Err(format!("Unknown messaging engine: {}", value)),
        }
    }
}

#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Wraps `data` into a freshly timestamped envelope and appends it to `stream`.
    async fn publish(
        &self,
        stream: &str,
        event_type: &str,
        data: Map<String, Value>,
    ) -> Result<(), EventLogError> {
        let envelope = EventEnvelope::now(event_type, data);

        self.append(stream, &envelope).await
    }

    async fn append(&self, stream: &str, envelope: &EventEnvelope) -> Result<(), EventLogError>;

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Receives every envelope read from a subscription, in stream order.
pub trait EnvelopeHandler: Send + Sync {
    fn handle(&self, envelope: &EventEnvelope) -> Result<(), HandlerError>;
}

#[async_trait]
pub trait EventLog: EventPublisher {
    /// Creates the given streams if absent. Existing streams are left untouched.
    async fn provision(&self, streams: &[&str]) -> Result<(), EventLogError>;

    /// Creates the cursor of `group` on `stream` if absent, so events appended from now on
    /// are kept for the group even before its first subscription.
    async fn provision_group(&self, stream: &str, group: &str) -> Result<(), EventLogError>;

    /// Reads `stream` under `group` until `shutdown` fires, then returns
    /// [`EventLogError::Cancelled`] carrying the shutdown reason.
    async fn subscribe(
        &self,
        stream: &str,
        group: &str,
        handler: Arc<dyn EnvelopeHandler>,
        shutdown: Shutdown,
    ) -> Result<(), EventLogError>;

    /// Like [`EventLog::subscribe`] with a private cursor that starts at the end of `stream`
    /// and is discarded when the subscription ends.
    async fn subscribe_transient(
        &self,
        stream: &str,
        handler: Arc<dyn EnvelopeHandler>,
        shutdown: Shutdown,
    ) -> Result<(), EventLogError>;
}

#[derive(Clone, Default)]
pub struct NullPublisher {}

#[async_trait]
impl EventPublisher for NullPublisher {
    async fn append(&self, stream: &str, envelope: &EventEnvelope) -> Result<(), EventLogError> {
        tracing::debug!(
            "Event logging disabled, dropping {} event for {}",
            envelope.event_type,
            stream
        );

        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// The publishing side handed to services plus, when a log backend is configured,
/// the same backend for subscriptions.
#[derive(Clone)]
pub struct Messaging {
    publisher: Arc<dyn EventPublisher>,
    log: Option<Arc<dyn EventLog>>,
}

impl Messaging {
    pub fn disabled() -> Self {
        Messaging {
            publisher: Arc::new(NullPublisher {}),
            log: None,
        }
    }

    pub fn from_log<L>(log: Arc<L>) -> Self
    where
        L: EventLog + 'static,
    {
        Messaging {
            publisher: log.clone(),
            log: Some(log as Arc<dyn EventLog>),
        }
    }

    pub fn publisher(&self) -> Arc<dyn EventPublisher> {
        self.publisher.clone()
    }

    pub fn log(&self) -> Option<Arc<dyn EventLog>> {
        self.log.clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.publisher.is_enabled()
    }
}

pub async fn create_messaging(config: &MessagingConfiguration) -> Messaging {
    let messaging = match config.engine() {
        MessagingEngine::Rabbitmq => match RabbitmqEventLog::connect(config.rabbitmq_url()).await
        {
            Ok(log) => Messaging::from_log(Arc::new(log)),
            Err(e) => {
                tracing::warn!(
                    "Event logging disabled, could not reach {}: {}",
                    config.rabbitmq_url(),
                    e
                );

                return Messaging::disabled();
            }
        },
        MessagingEngine::Memory => Messaging::from_log(Arc::new(InMemoryEventLog::new())),
        MessagingEngine::None => {
            tracing::info!("Event logging is turned off. Events won't be published.");

            return Messaging::disabled();
        }
    };

    if let Some(log) = messaging.log() {
        match log.provision(&config.streams().all()).await {
            Ok(()) => tracing::info!("Event streams ready: {:?}", config.streams().all()),
            Err(e) => tracing::error!("Failed to provision event streams: {}", e),
        }

        for (stream, group) in config.streams().with_groups(config.groups()) {
            if let Err(e) = log.provision_group(stream, group).await {
                tracing::error!(
                    stream = stream,
                    group = group,
                    "Failed to provision consumer group: {}",
                    e
                );
            }
        }
    }

    messaging
}
