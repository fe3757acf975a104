use crate::api::dto::{CreateUserRequest, MessageResponse, UserListQuery, UserListResponse};
use crate::api::server_state::ServerState;
use crate::application::service::user_service::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, NewUser};
use crate::domain::user::{User, UserChanges};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

#[utoipa::path(get, path = "/api/users",
    tag="users",
    params(UserListQuery),
    responses(
        (status = 200, description = "Page of users", content_type = "application/json", body = UserListResponse),
        (status = 401, description = "Unauthorized", content_type = "application/json", body = MessageResponse),
    )
)]
pub async fn list_users(
    State(state): State<ServerState>,
    Query(query): Query<UserListQuery>,
) -> impl IntoResponse {
    let page = query.page.unwrap_or(1).max(1);
    let page_size = query
        .page_size
        .filter(|size| *size >= 1)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(MAX_PAGE_SIZE);

    match state
        .user_service
        .list_users(page, page_size, query.search.as_deref())
        .await
    {
        Ok((items, total)) => (
            StatusCode::OK,
            Json(UserListResponse {
                items,
                total,
                page,
                page_size,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(get, path = "/api/users/{id}",
    tag="users",
    responses(
        (status = 200, description = "User details", content_type = "application/json", body = User),
        (status = 404, description = "User not found", content_type = "application/json", body = MessageResponse),
    )
)]
pub async fn get_user(State(state): State<ServerState>, Path(id): Path<i64>) -> impl IntoResponse {
    match state.user_service.get_user(id).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(post, path = "/api/users",
    tag="users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", content_type = "application/json", body = User),
        (status = 400, description = "Bad request", content_type = "application/json", body = MessageResponse),
        (status = 409, description = "Username already taken", content_type = "application/json", body = MessageResponse),
    )
)]
pub async fn create_user(
    State(state): State<ServerState>,
    Json(request): Json<CreateUserRequest>,
) -> impl IntoResponse {
    let new_user = NewUser {
        username: request.username,
        password: request.password,
        email: request.email,
        nickname: request.nickname,
        avatar: request.avatar,
        role_id: request.role_id,
        status: request.status,
    };

    match state.user_service.create_user(new_user).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(put, path = "/api/users/{id}",
    tag="users",
    request_body = UserChanges,
    responses(
        (status = 200, description = "User updated", content_type = "application/json", body = User),
        (status = 400, description = "Bad request", content_type = "application/json", body = MessageResponse),
        (status = 404, description = "User not found", content_type = "application/json", body = MessageResponse),
    )
)]
pub async fn update_user(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(changes): Json<UserChanges>,
) -> impl IntoResponse {
    match state.user_service.update_user(id, changes).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(delete, path = "/api/users/{id}",
    tag="users",
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", content_type = "application/json", body = MessageResponse),
    )
)]
pub async fn delete_user(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.user_service.delete_user(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
