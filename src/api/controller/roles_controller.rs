use crate::api::dto::{CreateRoleRequest, MessageResponse, RoleListResponse, UpdateRoleRequest};
use crate::api::server_state::ServerState;
use crate::domain::role::Role;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

#[utoipa::path(get, path = "/api/roles",
    tag="roles",
    responses(
        (status = 200, description = "All roles", content_type = "application/json", body = RoleListResponse),
    )
)]
pub async fn list_roles(State(state): State<ServerState>) -> impl IntoResponse {
    match state.role_repository.get_all().await {
        Ok(items) => (StatusCode::OK, Json(RoleListResponse { items })).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(get, path = "/api/roles/{id}",
    tag="roles",
    responses(
        (status = 200, description = "Role details", content_type = "application/json", body = Role),
        (status = 404, description = "Role not found", content_type = "application/json", body = MessageResponse),
    )
)]
pub async fn get_role(State(state): State<ServerState>, Path(id): Path<i64>) -> impl IntoResponse {
    match state.role_repository.get_by_id(id).await {
        Ok(role) => (StatusCode::OK, Json(role)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(post, path = "/api/roles",
    tag="roles",
    request_body = CreateRoleRequest,
    responses(
        (status = 201, description = "Role created", content_type = "application/json", body = Role),
        (status = 400, description = "Bad request", content_type = "application/json", body = MessageResponse),
    )
)]
pub async fn create_role(
    State(state): State<ServerState>,
    Json(request): Json<CreateRoleRequest>,
) -> impl IntoResponse {
    let name = request.name.trim().to_string();
    if name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse::new("Role name is required")),
        )
            .into_response();
    }

    match state
        .role_repository
        .create(&Role::now(name, request.description))
        .await
    {
        Ok(role) => (StatusCode::CREATED, Json(role)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(put, path = "/api/roles/{id}",
    tag="roles",
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", content_type = "application/json", body = Role),
        (status = 404, description = "Role not found", content_type = "application/json", body = MessageResponse),
    )
)]
pub async fn update_role(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateRoleRequest>,
) -> impl IntoResponse {
    let mut role = match state.role_repository.get_by_id(id).await {
        Ok(role) => role,
        Err(e) => return e.into_response(),
    };

    if let Some(name) = request.name {
        role.name = name;
    }
    if let Some(description) = request.description {
        role.description = description;
    }
    if let Some(status) = request.status {
        role.status = status;
    }

    if let Err(e) = state.role_repository.update(&role).await {
        return e.into_response();
    }

    match state.role_repository.get_by_id(id).await {
        Ok(role) => (StatusCode::OK, Json(role)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(delete, path = "/api/roles/{id}",
    tag="roles",
    responses(
        (status = 204, description = "Role deleted"),
        (status = 404, description = "Role not found", content_type = "application/json", body = MessageResponse),
    )
)]
pub async fn delete_role(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.role_repository.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
