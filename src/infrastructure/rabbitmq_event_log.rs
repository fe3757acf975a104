use crate::domain::event::EventEnvelope;
use crate::infrastructure::event_consumer::handle_payload;
use crate::infrastructure::message_publisher::{
    EnvelopeHandler, EventLog, EventLogError, EventPublisher,
};
use crate::infrastructure::shutdown::Shutdown;
use async_trait::async_trait;
use futures_lite::StreamExt;
use lapin::options::{
    BasicAckOptions, BasicConsumeOptions, BasicPublishOptions, BasicQosOptions,
    ExchangeDeclareOptions, QueueBindOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties, ExchangeKind};
use std::sync::Arc;
use uuid::Uuid;

const BIND_ALL: &str = "#";
const PREFETCH_COUNT: u16 = 16;

/// Durable log on RabbitMQ. A stream is a durable topic exchange and a consumer group is
/// a durable queue `<stream>.<group>` bound to it, so each group keeps its own cursor.
pub struct RabbitmqEventLog {
    connection: Connection,
    channel: Channel,
}

impl RabbitmqEventLog {
    pub async fn connect(url: &str) -> Result<Self, lapin::Error> {
        let connection = Connection::connect(url, ConnectionProperties::default()).await?;
        let channel = connection.create_channel().await?;
        tracing::info!("Connected to RabbitMQ at {}", url);

        Ok(RabbitmqEventLog {
            connection,
            channel,
        })
    }

    pub fn queue_name(stream: &str, group: &str) -> String {
        format!("{}.{}", stream, group)
    }

    async fn declare_stream(channel: &Channel, stream: &str) -> Result<(), lapin::Error> {
        channel
            .exchange_declare(
                stream,
                ExchangeKind::Topic,
                ExchangeDeclareOptions {
                    durable: true,
                    ..ExchangeDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
    }

    async fn declare_group(
        channel: &Channel,
        stream: &str,
        group: &str,
    ) -> Result<String, lapin::Error> {
        let queue_name = Self::queue_name(stream, group);

        channel
            .queue_declare(
                &queue_name,
                QueueDeclareOptions {
                    durable: true,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await?;

        channel
            .queue_bind(
                &queue_name,
                stream,
                BIND_ALL,
                QueueBindOptions::default(),
                FieldTable::default(),
            )
            .await?;

        Ok(queue_name)
    }

    async fn consume(
        channel: Channel,
        stream: &str,
        group: &str,
        queue_name: &str,
        handler: Arc<dyn EnvelopeHandler>,
        shutdown: Shutdown,
    ) -> Result<(), EventLogError> {
        channel
            .basic_qos(PREFETCH_COUNT, BasicQosOptions::default())
            .await
            .map_err(subscribe_failed)?;

        let consumer_tag = format!("{}-{}", group, Uuid::new_v4());
        let mut consumer = channel
            .basic_consume(
                queue_name,
                &consumer_tag,
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(subscribe_failed)?;

        tracing::info!(
            stream = stream,
            group = group,
            "Consuming from queue {} as {}",
            queue_name,
            consumer_tag
        );

        loop {
            tokio::select! {
                reason = shutdown.cancelled() => {
                    if let Err(e) = channel.close(200, "shutdown").await {
                        tracing::debug!("Failed to close consumer channel: {}", e);
                    }

                    return Err(EventLogError::Cancelled(reason));
                }
                delivery = consumer.next() => {
                    let delivery = match delivery {
                        Some(Ok(delivery)) => delivery,
                        Some(Err(e)) => return Err(subscribe_failed(e)),
                        None => {
                            return Err(EventLogError::SubscribeFailed(format!(
                                "consumer for {} closed by broker",
                                queue_name
                            )));
                        }
                    };

                    handle_payload(stream, &delivery.data, handler.as_ref());

                    if let Err(e) = delivery.ack(BasicAckOptions::default()).await {
                        tracing::warn!(stream = stream, "Failed to ack delivery: {}", e);
                    }
                }
            }
        }
    }
}

#[async_trait]
impl EventPublisher for RabbitmqEventLog {
    async fn append(&self, stream: &str, envelope: &EventEnvelope) -> Result<(), EventLogError> {
        let payload = serde_json::to_vec(envelope)?;

        self.channel
            .basic_publish(
                stream,
                &envelope.event_type,
                BasicPublishOptions::default(),
                &payload,
                BasicProperties::default()
                    .with_content_type("application/json".into())
                    .with_delivery_mode(2),
            )
            .await
            .map_err(|e| EventLogError::PublishFailed(e.to_string()))?
            .await
            .map_err(|e| EventLogError::PublishFailed(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl EventLog for RabbitmqEventLog {
    async fn provision(&self, streams: &[&str]) -> Result<(), EventLogError> {
        for stream in streams {
            Self::declare_stream(&self.channel, stream)
                .await
                .map_err(|e| EventLogError::Provisioning(format!("{}: {}", stream, e)))?;
        }

        Ok(())
    }

    async fn provision_group(&self, stream: &str, group: &str) -> Result<(), EventLogError> {
        let provisioning_failed =
            |e: lapin::Error| EventLogError::Provisioning(format!("{}.{}: {}", stream, group, e));

        Self::declare_stream(&self.channel, stream)
            .await
            .map_err(provisioning_failed)?;
        Self::declare_group(&self.channel, stream, group)
            .await
            .map_err(provisioning_failed)?;

        Ok(())
    }

    async fn subscribe(
        &self,
        stream: &str,
        group: &str,
        handler: Arc<dyn EnvelopeHandler>,
        shutdown: Shutdown,
    ) -> Result<(), EventLogError> {
        let channel = self
            .connection
            .create_channel()
            .await
            .map_err(subscribe_failed)?;
        Self::declare_stream(&channel, stream)
            .await
            .map_err(subscribe_failed)?;
        let queue_name = Self::declare_group(&channel, stream, group)
            .await
            .map_err(subscribe_failed)?;

        Self::consume(channel, stream, group, &queue_name, handler, shutdown).await
    }

    async fn subscribe_transient(
        &self,
        stream: &str,
        handler: Arc<dyn EnvelopeHandler>,
        shutdown: Shutdown,
    ) -> Result<(), EventLogError> {
        let channel = self
            .connection
            .create_channel()
            .await
            .map_err(subscribe_failed)?;
        Self::declare_stream(&channel, stream)
            .await
            .map_err(subscribe_failed)?;

        let queue = channel
            .queue_declare(
                "",
                QueueDeclareOptions {
                    exclusive: true,
                    auto_delete: true,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(subscribe_failed)?;
        let queue_name = queue.name().as_str().to_string();
        channel
            .queue_bind(
                &queue_name,
                stream,
                BIND_ALL,
                QueueBindOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(subscribe_failed)?;

        Self::consume(channel, stream, "transient", &queue_name, handler, shutdown).await
    }
}

fn subscribe_failed(e: lapin::Error) -> EventLogError {
    EventLogError::SubscribeFailed(e.to_string())
}
