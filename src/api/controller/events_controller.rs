use crate::api::dto::{EventStatusResponse, MessageResponse, TestEventRequest};
use crate::api::extractor::auth_extractor::AuthenticatedUser;
use crate::api::server_state::ServerState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde_json::json;

#[utoipa::path(get, path = "/api/events/status",
    tag="events",
    responses(
        (status = 200, description = "Event logging status", content_type = "application/json", body = EventStatusResponse),
    )
)]
pub async fn event_status(State(state): State<ServerState>) -> impl IntoResponse {
    let status = if state.events.is_enabled() {
        "enabled"
    } else {
        "disabled"
    };

    (
        StatusCode::OK,
        Json(EventStatusResponse {
            status: status.to_string(),
            streams: state
                .events
                .streams()
                .all()
                .iter()
                .map(|stream| stream.to_string())
                .collect(),
        }),
    )
}

#[utoipa::path(post, path = "/api/events/test",
    tag="events",
    request_body = TestEventRequest,
    responses(
        (status = 200, description = "Test event published", content_type = "application/json", body = MessageResponse),
        (status = 500, description = "Publishing failed", content_type = "application/json", body = MessageResponse),
        (status = 503, description = "Event logging disabled", content_type = "application/json", body = MessageResponse),
    )
)]
pub async fn send_test_event(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<TestEventRequest>,
) -> impl IntoResponse {
    if !state.events.is_enabled() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(MessageResponse::new("Event logging is disabled")),
        );
    }

    let message = request
        .message
        .unwrap_or_else(|| "Test event from admin API".to_string());
    let details = json!({"user_id": user.subject_id, "username": user.username});

    match state.events.send_system_info(&message, details).await {
        Ok(()) => (StatusCode::OK, Json(MessageResponse::new("Test event sent"))),
        Err(e) => {
            tracing::error!("Failed to send test event: {}", e);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse::new("Failed to send test event")),
            )
        }
    }
}
