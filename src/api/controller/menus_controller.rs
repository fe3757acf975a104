use crate::api::dto::{CreateMenuRequest, MenuListResponse, MessageResponse, UpdateMenuRequest};
use crate::api::server_state::ServerState;
use crate::domain::menu::Menu;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

#[utoipa::path(get, path = "/api/menus",
    tag="menus",
    responses(
        (status = 200, description = "All menus ordered by sort", content_type = "application/json", body = MenuListResponse),
    )
)]
pub async fn list_menus(State(state): State<ServerState>) -> impl IntoResponse {
    match state.menu_repository.get_all().await {
        Ok(items) => (StatusCode::OK, Json(MenuListResponse { items })).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(get, path = "/api/menus/{id}",
    tag="menus",
    responses(
        (status = 200, description = "Menu details", content_type = "application/json", body = Menu),
        (status = 404, description = "Menu not found", content_type = "application/json", body = MessageResponse),
    )
)]
pub async fn get_menu(State(state): State<ServerState>, Path(id): Path<i64>) -> impl IntoResponse {
    match state.menu_repository.get_by_id(id).await {
        Ok(menu) => (StatusCode::OK, Json(menu)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(post, path = "/api/menus",
    tag="menus",
    request_body = CreateMenuRequest,
    responses(
        (status = 201, description = "Menu created", content_type = "application/json", body = Menu),
        (status = 400, description = "Bad request", content_type = "application/json", body = MessageResponse),
    )
)]
pub async fn create_menu(
    State(state): State<ServerState>,
    Json(request): Json<CreateMenuRequest>,
) -> impl IntoResponse {
    let name = request.name.trim().to_string();
    if name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse::new("Menu name is required")),
        )
            .into_response();
    }

    let mut menu = Menu::now(name);
    menu.path = request.path.unwrap_or_default();
    menu.component = request.component.unwrap_or_default();
    menu.icon = request.icon.unwrap_or_default();
    menu.sort = request.sort.unwrap_or_default();
    menu.parent_id = request.parent_id;

    match state.menu_repository.create(&menu).await {
        Ok(menu) => (StatusCode::CREATED, Json(menu)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(put, path = "/api/menus/{id}",
    tag="menus",
    request_body = UpdateMenuRequest,
    responses(
        (status = 200, description = "Menu updated", content_type = "application/json", body = Menu),
        (status = 404, description = "Menu not found", content_type = "application/json", body = MessageResponse),
    )
)]
pub async fn update_menu(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateMenuRequest>,
) -> impl IntoResponse {
    let mut menu = match state.menu_repository.get_by_id(id).await {
        Ok(menu) => menu,
        Err(e) => return e.into_response(),
    };

    if let Some(name) = request.name {
        menu.name = name;
    }
    if let Some(path) = request.path {
        menu.path = path;
    }
    if let Some(component) = request.component {
        menu.component = component;
    }
    if let Some(icon) = request.icon {
        menu.icon = icon;
    }
    if let Some(sort) = request.sort {
        menu.sort = sort;
    }
    if request.parent_id.is_some() {
        menu.parent_id = request.parent_id;
    }
    if let Some(status) = request.status {
        menu.status = status;
    }

    if let Err(e) = state.menu_repository.update(&menu).await {
        return e.into_response();
    }

    match state.menu_repository.get_by_id(id).await {
        Ok(menu) => (StatusCode::OK, Json(menu)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(delete, path = "/api/menus/{id}",
    tag="menus",
    responses(
        (status = 204, description = "Menu deleted"),
        (status = 404, description = "Menu not found", content_type = "application/json", body = MessageResponse),
    )
)]
pub async fn delete_menu(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.menu_repository.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
