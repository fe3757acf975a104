use crate::acceptance::utils::{auth_header, create_user_with_token};
use crate::utils::events::FailingPublisher;
use crate::utils::runners::{
    run_acceptance_test, run_acceptance_test_with_default, run_acceptance_test_with_publisher,
};
use admin_service::api::dto::{EventStatusResponse, MessageResponse};
use admin_service::infrastructure::message_publisher::MessagingEngine;
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn it_reports_enabled_event_logging() {
    run_acceptance_test_with_default(|c| async move {
        let (_, token) = create_user_with_token(&c).await;

        let (name, value) = auth_header(&token);
        let response = c.server.get("/api/events/status").add_header(name, value).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        let body = response.json::<EventStatusResponse>();
        assert_eq!(body.status, "enabled");
        assert_eq!(body.streams, vec!["user_events", "system_logs"]);
    })
    .await;
}

#[tokio::test]
async fn it_publishes_test_event() {
    run_acceptance_test_with_default(|c| async move {
        let (user_id, token) = create_user_with_token(&c).await;

        let (name, value) = auth_header(&token);
        let response = c
            .server
            .post("/api/events/test")
            .add_header(name, value)
            .json(&json!({"message": "ping"}))
            .await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<MessageResponse>().message, "Test event sent");

        let event = c
            .wait_for_system_event(1000, |e| e.event_type == "system_info")
            .await
            .unwrap();
        assert_eq!(event.data["message"], "ping");
        assert_eq!(event.data["level"], "info");
        assert_eq!(event.data["details"]["user_id"], user_id);
    })
    .await;
}

#[tokio::test]
async fn it_reports_unavailable_when_event_logging_is_off() {
    run_acceptance_test(
        |builder| {
            builder.messaging.engine(MessagingEngine::None);
        },
        |c| async move {
            let (_, token) = create_user_with_token(&c).await;

            let (name, value) = auth_header(&token);
            let response = c.server.get("/api/events/status").add_header(name, value).await;
            assert_eq!(response.json::<EventStatusResponse>().status, "disabled");

            let (name, value) = auth_header(&token);
            let response = c
                .server
                .post("/api/events/test")
                .add_header(name, value)
                .json(&json!({}))
                .await;
            assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        },
    )
    .await;
}

#[tokio::test]
async fn it_reports_failure_when_publishing_fails() {
    run_acceptance_test_with_publisher(Arc::new(FailingPublisher::default()), |c| async move {
        let (_, token) = create_user_with_token(&c).await;

        let (name, value) = auth_header(&token);
        let response = c
            .server
            .post("/api/events/test")
            .add_header(name, value)
            .json(&json!({"message": "ping"}))
            .await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    })
    .await;
}

#[tokio::test]
async fn it_keeps_serving_live_session_of_removed_user() {
    run_acceptance_test_with_default(|c| async move {
        let (user_id, token) = create_user_with_token(&c).await;
        c.user_service.delete_user(user_id).await.unwrap();

        let (name, value) = auth_header(&token);
        let response = c
            .server
            .post("/api/events/test")
            .add_header(name, value)
            .json(&json!({"message": "orphan"}))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let event = c
            .wait_for_system_event(1000, |e| e.data["message"] == "orphan")
            .await
            .unwrap();
        assert_eq!(event.data["details"]["username"], "unknown");
        assert_eq!(event.data["details"]["user_id"], user_id);
    })
    .await;
}
