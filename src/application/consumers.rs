use crate::application::event_dispatcher::EventDispatcher;
use crate::domain::event::{ConsumerGroups, EventStreams};
use crate::infrastructure::message_publisher::{EnvelopeHandler, EventLog, EventLogError};
use crate::infrastructure::shutdown::{Shutdown, ShutdownTrigger, shutdown_channel};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Background subscriptions started at boot, stopped and joined on shutdown.
pub struct EventConsumers {
    trigger: ShutdownTrigger,
    handles: Vec<JoinHandle<()>>,
}

impl EventConsumers {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub async fn shutdown(self, reason: &str) {
        self.trigger.cancel(reason);

        for handle in self.handles {
            if let Err(e) = handle.await {
                tracing::error!("Event consumer task failed: {}", e);
            }
        }

        tracing::info!("Event consumers stopped");
    }
}

pub fn spawn_event_consumers(
    log: Arc<dyn EventLog>,
    streams: &EventStreams,
    groups: &ConsumerGroups,
    retry_delay: Duration,
) -> EventConsumers {
    let (trigger, shutdown) = shutdown_channel();

    let handles = vec![
        spawn_consumer(
            log.clone(),
            streams.user_events.clone(),
            groups.user_events.clone(),
            Arc::new(EventDispatcher::user_events()),
            shutdown.clone(),
            retry_delay,
        ),
        spawn_consumer(
            log,
            streams.system_logs.clone(),
            groups.system_logs.clone(),
            Arc::new(EventDispatcher::system_logs()),
            shutdown,
            retry_delay,
        ),
    ];

    EventConsumers { trigger, handles }
}

/// Keeps one subscription alive until `shutdown` fires, resubscribing after `retry_delay`
/// whenever the backend drops it.
pub fn spawn_consumer(
    log: Arc<dyn EventLog>,
    stream: String,
    group: String,
    handler: Arc<dyn EnvelopeHandler>,
    shutdown: Shutdown,
    retry_delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match log
                .subscribe(&stream, &group, handler.clone(), shutdown.clone())
                .await
            {
                Err(EventLogError::Cancelled(reason)) => {
                    tracing::info!(stream = stream.as_str(), "Consumer stopped: {}", reason);
                    return;
                }
                Err(e) => {
                    tracing::error!(stream = stream.as_str(), "Subscription failed: {}", e);
                }
                Ok(()) => {
                    tracing::warn!(stream = stream.as_str(), "Subscription ended unexpectedly");
                }
            }

            tokio::select! {
                reason = shutdown.cancelled() => {
                    tracing::info!(stream = stream.as_str(), "Consumer stopped: {}", reason);
                    return;
                }
                _ = tokio::time::sleep(retry_delay) => {
                    tracing::info!(stream = stream.as_str(), "Resubscribing as {}", group);
                }
            }
        }
    })
}
