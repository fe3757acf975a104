use crate::api::controller::auth_controller::*;
use crate::api::controller::events_controller::*;
use crate::api::controller::menus_controller::*;
use crate::api::controller::roles_controller::*;
use crate::api::controller::users_controller::*;
use crate::api::controller::utils_controller::*;
use crate::api::dto::*;
use crate::api::middleware::auth_mw::session_gate;
use crate::api::server_state::ServerState;
use crate::domain::menu::Menu;
use crate::domain::role::Role;
use crate::domain::user::{User, UserChanges};
use axum::routing::{get, post};
use axum::{Router, middleware};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn routes(state: ServerState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(health_action))
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .merge(
            Router::new()
                .route("/api/auth/logout", post(logout))
                .route("/api/auth/profile", get(get_profile))
                .route("/api/users", get(list_users).post(create_user))
                .route(
                    "/api/users/{id}",
                    get(get_user).put(update_user).delete(delete_user),
                )
                .route("/api/roles", get(list_roles).post(create_role))
                .route(
                    "/api/roles/{id}",
                    get(get_role).put(update_role).delete(delete_role),
                )
                .route("/api/menus", get(list_menus).post(create_menu))
                .route(
                    "/api/menus/{id}",
                    get(get_menu).put(update_menu).delete(delete_menu),
                )
                .route("/api/events/status", get(event_status))
                .route("/api/events/test", post(send_test_event))
                .layer(middleware::from_fn_with_state(state.clone(), session_gate)),
        )
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

#[derive(OpenApi)]
#[openapi(
    servers(
        (description="dev", url="http://localhost:8080"),
    ),
    paths(
        health_action,
        login,
        logout,
        get_profile,
        register,
        list_users,
        get_user,
        create_user,
        update_user,
        delete_user,
        list_roles,
        get_role,
        create_role,
        update_role,
        delete_role,
        list_menus,
        get_menu,
        create_menu,
        update_menu,
        delete_menu,
        event_status,
        send_test_event,
    ),
    components(
        schemas(
            HealthResponse,
            MessageResponse,
            LoginRequest,
            LoginResponse,
            RegisterRequest,
            CreateUserRequest,
            UserListResponse,
            CreateRoleRequest,
            UpdateRoleRequest,
            RoleListResponse,
            CreateMenuRequest,
            UpdateMenuRequest,
            MenuListResponse,
            EventStatusResponse,
            TestEventRequest,
            User,
            UserChanges,
            Role,
            Menu,
        ),
    )
)]
pub struct ApiDoc;
