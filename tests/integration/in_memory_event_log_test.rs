use crate::utils::events::{RecordingHandler, wait_until};
use admin_service::infrastructure::in_memory_event_log::InMemoryEventLog;
use admin_service::infrastructure::message_publisher::{EventLog, EventLogError, EventPublisher};
use admin_service::infrastructure::shutdown::shutdown_channel;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;

fn data(key: &str, value: i64) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert(key.to_string(), Value::from(value));
    data
}

#[tokio::test]
async fn it_delivers_envelopes_in_append_order() {
    let log = Arc::new(InMemoryEventLog::new());
    for tag in ["user_login", "user_update", "user_logout"] {
        log.publish("user_events", tag, Map::new()).await.unwrap();
    }

    let handler = Arc::new(RecordingHandler::new());
    let (trigger, shutdown) = shutdown_channel();
    let subscription = {
        let log = log.clone();
        let handler = handler.clone();
        tokio::spawn(async move { log.subscribe("user_events", "g", handler, shutdown).await })
    };

    assert!(wait_until(1000, || handler.count() == 3).await);
    trigger.cancel("done");

    let result = subscription.await.unwrap();
    assert!(matches!(result, Err(EventLogError::Cancelled(reason)) if reason == "done"));
    assert_eq!(
        handler.seen_types(),
        vec!["user_login", "user_update", "user_logout"]
    );
}

#[tokio::test]
async fn it_delivers_envelopes_appended_while_subscribed() {
    let log = Arc::new(InMemoryEventLog::new());
    log.provision(&["system_logs"]).await.unwrap();

    let handler = Arc::new(RecordingHandler::new());
    let (trigger, shutdown) = shutdown_channel();
    let subscription = {
        let log = log.clone();
        let handler = handler.clone();
        tokio::spawn(async move { log.subscribe("system_logs", "g", handler, shutdown).await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    log.publish("system_logs", "system_info", data("n", 1))
        .await
        .unwrap();

    assert!(wait_until(1000, || handler.count() == 1).await);
    assert_eq!(handler.seen()[0].data["n"], 1);

    trigger.cancel("done");
    subscription.await.unwrap().unwrap_err();
}

#[tokio::test]
async fn it_skips_malformed_payloads() {
    let log = Arc::new(InMemoryEventLog::new());
    log.append_raw("user_events", b"definitely not json".to_vec())
        .unwrap();
    log.publish("user_events", "user_login", Map::new())
        .await
        .unwrap();

    let handler = Arc::new(RecordingHandler::new());
    let (trigger, shutdown) = shutdown_channel();
    let subscription = {
        let log = log.clone();
        let handler = handler.clone();
        tokio::spawn(async move { log.subscribe("user_events", "g", handler, shutdown).await })
    };

    assert!(wait_until(1000, || log.offset("user_events", "g") == 2).await);
    trigger.cancel("done");
    subscription.await.unwrap().unwrap_err();

    assert_eq!(handler.seen_types(), vec!["user_login"]);
}

#[tokio::test]
async fn it_continues_after_handler_failure() {
    let log = Arc::new(InMemoryEventLog::new());
    for tag in ["user_delete", "user_login"] {
        log.publish("user_events", tag, Map::new()).await.unwrap();
    }

    let handler = Arc::new(RecordingHandler::failing_on("user_delete"));
    let (trigger, shutdown) = shutdown_channel();
    let subscription = {
        let log = log.clone();
        let handler = handler.clone();
        tokio::spawn(async move { log.subscribe("user_events", "g", handler, shutdown).await })
    };

    assert!(wait_until(1000, || handler.count() == 2).await);
    trigger.cancel("done");
    subscription.await.unwrap().unwrap_err();

    assert_eq!(log.offset("user_events", "g"), 2);
}

#[tokio::test]
async fn it_tracks_groups_independently() {
    let log = Arc::new(InMemoryEventLog::new());
    log.publish("user_events", "user_login", Map::new())
        .await
        .unwrap();

    let first = Arc::new(RecordingHandler::new());
    let second = Arc::new(RecordingHandler::new());
    let (trigger, shutdown) = shutdown_channel();

    let subscriptions = [("a", first.clone()), ("b", second.clone())].map(|(group, handler)| {
        let log = log.clone();
        let shutdown = shutdown.clone();
        tokio::spawn(async move { log.subscribe("user_events", group, handler, shutdown).await })
    });

    assert!(wait_until(1000, || first.count() == 1 && second.count() == 1).await);
    trigger.cancel("done");
    for subscription in subscriptions {
        subscription.await.unwrap().unwrap_err();
    }
}

#[tokio::test]
async fn it_resumes_group_from_last_offset() {
    let log = Arc::new(InMemoryEventLog::new());
    log.publish("user_events", "user_login", Map::new())
        .await
        .unwrap();

    let handler = Arc::new(RecordingHandler::new());
    let (trigger, shutdown) = shutdown_channel();
    let subscription = {
        let log = log.clone();
        let handler = handler.clone();
        tokio::spawn(async move { log.subscribe("user_events", "g", handler, shutdown).await })
    };
    assert!(wait_until(1000, || handler.count() == 1).await);
    trigger.cancel("restart");
    subscription.await.unwrap().unwrap_err();

    log.publish("user_events", "user_logout", Map::new())
        .await
        .unwrap();

    let resumed = Arc::new(RecordingHandler::new());
    let (trigger, shutdown) = shutdown_channel();
    let subscription = {
        let log = log.clone();
        let handler = resumed.clone();
        tokio::spawn(async move { log.subscribe("user_events", "g", handler, shutdown).await })
    };
    assert!(wait_until(1000, || resumed.count() == 1).await);
    trigger.cancel("done");
    subscription.await.unwrap().unwrap_err();

    assert_eq!(resumed.seen_types(), vec!["user_logout"]);
}

#[tokio::test]
async fn it_returns_promptly_when_already_cancelled() {
    let log = InMemoryEventLog::new();
    let (trigger, shutdown) = shutdown_channel();
    trigger.cancel("stopped early");

    let result = tokio::time::timeout(
        Duration::from_secs(1),
        log.subscribe(
            "user_events",
            "g",
            Arc::new(RecordingHandler::new()),
            shutdown,
        ),
    )
    .await
    .unwrap();

    assert!(matches!(result, Err(EventLogError::Cancelled(reason)) if reason == "stopped early"));
}

#[tokio::test]
async fn it_provisions_group_cursor_at_stream_start() {
    let log = Arc::new(InMemoryEventLog::new());
    log.provision_group("user_events", "g").await.unwrap();
    log.publish("user_events", "user_login", Map::new())
        .await
        .unwrap();
    assert_eq!(log.offset("user_events", "g"), 0);

    let handler = Arc::new(RecordingHandler::new());
    let (trigger, shutdown) = shutdown_channel();
    let subscription = {
        let log = log.clone();
        let handler = handler.clone();
        tokio::spawn(async move { log.subscribe("user_events", "g", handler, shutdown).await })
    };

    assert!(wait_until(1000, || handler.count() == 1).await);
    trigger.cancel("done");
    subscription.await.unwrap().unwrap_err();
    assert_eq!(log.offset("user_events", "g"), 1);
}

#[tokio::test]
async fn it_reads_only_new_envelopes_in_transient_subscription() {
    let log = Arc::new(InMemoryEventLog::new());
    log.publish("user_events", "user_login", Map::new())
        .await
        .unwrap();

    let handler = Arc::new(RecordingHandler::new());
    let (trigger, shutdown) = shutdown_channel();
    let subscription = {
        let log = log.clone();
        let handler = handler.clone();
        tokio::spawn(async move { log.subscribe_transient("user_events", handler, shutdown).await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    log.publish("user_events", "user_logout", Map::new())
        .await
        .unwrap();

    assert!(wait_until(1000, || handler.count() == 1).await);
    trigger.cancel("done");
    let result = subscription.await.unwrap();
    assert!(matches!(result, Err(EventLogError::Cancelled(_))));
    assert_eq!(handler.seen_types(), vec!["user_logout"]);
}
