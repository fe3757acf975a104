use crate::api::dto::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use crate::api::extractor::auth_extractor::AuthenticatedUser;
use crate::api::extractor::client_ip::ClientIp;
use crate::api::server_state::ServerState;
use crate::domain::user::User;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};

#[utoipa::path(post, path = "/api/auth/login",
    tag="auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", content_type = "application/json", body = LoginResponse),
        (status = 401, description = "Invalid credentials", content_type = "application/json", body = MessageResponse),
        (status = 403, description = "User disabled", content_type = "application/json", body = MessageResponse),
        (status = 404, description = "User not found", content_type = "application/json", body = MessageResponse),
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    ClientIp(client_ip): ClientIp,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    match state
        .session_service
        .login(&request.username, &request.password, &client_ip)
        .await
    {
        Ok((token, user)) => (
            StatusCode::OK,
            Json(LoginResponse {
                token: token.value,
                expires_at: token.expires_at,
                user,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(post, path = "/api/auth/logout",
    tag="auth",
    responses(
        (status = 200, description = "Session revoked", content_type = "application/json", body = MessageResponse),
        (status = 401, description = "Unauthorized", content_type = "application/json", body = MessageResponse),
    )
)]
pub async fn logout(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> impl IntoResponse {
    match state
        .session_service
        .logout(user.subject_id, &user.username)
        .await
    {
        Ok(()) => (StatusCode::OK, Json(MessageResponse::new("Logged out"))).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(get, path = "/api/auth/profile",
    tag="auth",
    responses(
        (status = 200, description = "Current user", content_type = "application/json", body = User),
        (status = 401, description = "Unauthorized", content_type = "application/json", body = MessageResponse),
    )
)]
pub async fn get_profile(
    State(state): State<ServerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> impl IntoResponse {
    match state.user_service.get_profile(user.subject_id).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(post, path = "/api/auth/register",
    tag="auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", content_type = "application/json", body = User),
        (status = 400, description = "Bad request", content_type = "application/json", body = MessageResponse),
        (status = 409, description = "Username already taken", content_type = "application/json", body = MessageResponse),
    )
)]
pub async fn register(
    State(state): State<ServerState>,
    Json(request): Json<RegisterRequest>,
) -> impl IntoResponse {
    match state
        .user_service
        .register(&request.username, &request.password, &request.email)
        .await
    {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => e.into_response(),
    }
}
