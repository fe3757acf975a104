use crate::api::extractor::auth_extractor::{AuthenticatedUser, BearerToken};
use crate::api::server_state::ServerState;
use crate::application::service::user_service::UserServiceError;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::IntoResponse;

/// Rejects the request unless the bearer token validates against a live session.
pub async fn session_gate(
    State(state): State<ServerState>,
    BearerToken(token): BearerToken,
    mut request: Request,
    next: Next,
) -> impl IntoResponse {
    let subject_id = match state.session_service.validate(&token).await {
        Ok(subject_id) => subject_id,
        Err(e) => {
            tracing::debug!("Session gate rejected request: {}", e);
            return e.into_response();
        }
    };

    let username = match state.user_service.get_user(subject_id).await {
        Ok(user) => user.username,
        Err(UserServiceError::NotFound) => {
            tracing::warn!(user_id = subject_id, "Live session without a user record");
            "unknown".to_string()
        }
        Err(e) => {
            tracing::error!(user_id = subject_id, "Session gate could not load user: {}", e);
            return e.into_response();
        }
    };

    request.extensions_mut().insert(AuthenticatedUser {
        subject_id,
        username,
    });

    next.run(request).await
}
