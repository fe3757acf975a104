use crate::application::configuration::app::AppConfiguration;
use crate::application::service::event_emitter::EventEmitter;
use crate::application::service::session_service::SessionService;
use crate::application::service::user_service::UserService;
use crate::domain::repositories::{MenuRepository, RoleRepository};
use std::sync::Arc;

#[derive(Clone)]
pub struct ServerState {
    pub config: AppConfiguration,
    pub session_service: Arc<SessionService>,
    pub user_service: Arc<UserService>,
    pub role_repository: Arc<dyn RoleRepository>,
    pub menu_repository: Arc<dyn MenuRepository>,
    pub events: EventEmitter,
}

impl ServerState {
    pub fn new(
        config: AppConfiguration,
        session_service: Arc<SessionService>,
        user_service: Arc<UserService>,
        role_repository: Arc<dyn RoleRepository>,
        menu_repository: Arc<dyn MenuRepository>,
        events: EventEmitter,
    ) -> Self {
        ServerState {
            config,
            session_service,
            user_service,
            role_repository,
            menu_repository,
            events,
        }
    }
}
