use admin_service::application::service::event_emitter::EventEmitter;
use admin_service::infrastructure::message_publisher::{
    EventPublisher, Messaging, MessagingEngine, NullPublisher,
};
use serde_json::{Map, json};

#[tokio::test]
async fn it_drops_events_when_disabled() {
    let publisher = NullPublisher {};

    assert!(!publisher.is_enabled());
    assert!(
        publisher
            .publish("user_events", "user_login", Map::new())
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn it_reports_disabled_messaging() {
    let messaging = Messaging::disabled();
    let events = EventEmitter::disabled();

    assert!(!messaging.is_enabled());
    assert!(messaging.log().is_none());
    assert!(!events.is_enabled());

    events.user_login(1, "alice", "127.0.0.1");
    assert!(
        events
            .send_system_info("still fine", json!({}))
            .await
            .is_ok()
    );
}

#[test]
fn it_parses_messaging_engine() {
    assert_eq!(
        MessagingEngine::try_from("RabbitMQ".to_string()),
        Ok(MessagingEngine::Rabbitmq)
    );
    assert_eq!(
        MessagingEngine::try_from("none".to_string()),
        Ok(MessagingEngine::None)
    );
    assert!(MessagingEngine::try_from("kafka".to_string()).is_err());
    assert_eq!(MessagingEngine::default(), MessagingEngine::Rabbitmq);
}
