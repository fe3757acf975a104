use crate::utils::cli::CommandFactory;
use crate::utils::events::wait_for_event;
use admin_service::application::service::session_service::SessionService;
use admin_service::application::service::user_service::{NewUser, UserService};
use admin_service::domain::event::{EventEnvelope, EventStreams};
use admin_service::domain::repositories::{MenuRepository, RoleRepository, UserRepository};
use admin_service::domain::token::TokenCodec;
use admin_service::domain::user::User;
use admin_service::infrastructure::in_memory_event_log::InMemoryEventLog;
use admin_service::infrastructure::in_memory_session_store::InMemorySessionStore;
use axum_test::TestServer;
use std::sync::Arc;

pub struct AcceptanceTestContext {
    pub server: TestServer,
    pub session_service: Arc<SessionService>,
    pub user_service: Arc<UserService>,
    pub user_repository: Arc<dyn UserRepository>,
    pub role_repository: Arc<dyn RoleRepository>,
    pub menu_repository: Arc<dyn MenuRepository>,
    pub session_store: Arc<InMemorySessionStore>,
    pub event_log: Option<Arc<InMemoryEventLog>>,
    pub streams: EventStreams,
    pub token_codec: TokenCodec,
}

impl AcceptanceTestContext {
    pub async fn create_user(&self, username: &str, password: &str) -> User {
        self.user_service
            .create_user(NewUser {
                username: username.to_string(),
                password: password.to_string(),
                email: format!("{}@example.test", username),
                nickname: None,
                avatar: None,
                role_id: None,
                status: None,
            })
            .await
            .unwrap()
    }

    pub async fn login(&self, username: &str, password: &str) -> String {
        let (token, _) = self
            .session_service
            .login(username, password, "127.0.0.1")
            .await
            .unwrap();

        token.value
    }

    pub async fn wait_for_user_event(
        &self,
        timeout_ms: u64,
        predicate: impl Fn(&EventEnvelope) -> bool,
    ) -> Option<EventEnvelope> {
        let log = self.event_log.as_ref()?;

        wait_for_event(log, &self.streams.user_events, timeout_ms, predicate).await
    }

    pub async fn wait_for_system_event(
        &self,
        timeout_ms: u64,
        predicate: impl Fn(&EventEnvelope) -> bool,
    ) -> Option<EventEnvelope> {
        let log = self.event_log.as_ref()?;

        wait_for_event(log, &self.streams.system_logs, timeout_ms, predicate).await
    }
}

pub struct CliTestContext {
    pub user_repository: Arc<dyn UserRepository>,
    pub command_factory: CommandFactory,
}

impl CliTestContext {
    pub fn new(user_repository: Arc<dyn UserRepository>, command_factory: CommandFactory) -> Self {
        CliTestContext {
            user_repository,
            command_factory,
        }
    }
}
