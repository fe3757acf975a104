use crate::utils::cli::CommandFactory;
use crate::utils::config::{init_test_cli_config_builder, init_test_config_builder};
use crate::utils::context::{AcceptanceTestContext, CliTestContext};
use crate::utils::server::create_test_server;
use admin_service::api::server_state::ServerState;
use admin_service::application::configuration::composed::{Configuration, ConfigurationBuilder};
use admin_service::application::service::event_emitter::EventEmitter;
use admin_service::application::service::session_service::SessionService;
use admin_service::application::service::user_service::UserService;
use admin_service::domain::crypto::SchemeAwareHasher;
use admin_service::infrastructure::database::{create_pool, migrate};
use admin_service::infrastructure::in_memory_event_log::InMemoryEventLog;
use admin_service::infrastructure::in_memory_session_store::InMemorySessionStore;
use admin_service::infrastructure::message_publisher::{EventLog, EventPublisher, MessagingEngine};
use admin_service::infrastructure::repository::{
    create_menu_repository, create_role_repository, create_user_repository,
};
use sqlx::Sqlite;
use sqlx::migrate::MigrateDatabase;
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

const NONE_CONFIGURATOR: fn(&mut ConfigurationBuilder) = |_| {};

pub async fn run_acceptance_test_with_default<F, Fut>(test: F)
where
    F: Fn(AcceptanceTestContext) -> Fut,
    Fut: Future<Output = ()>,
{
    run_acceptance_test(NONE_CONFIGURATOR, test).await;
}

pub async fn run_acceptance_test<F, Fut, C>(configurator: C, test: F)
where
    F: Fn(AcceptanceTestContext) -> Fut,
    Fut: Future<Output = ()>,
    C: FnOnce(&mut ConfigurationBuilder),
{
    let config = init_test_config_builder(configurator).build();

    test(create_context(&config, None).await).await;
}

/// Runs with the given publisher in place of the configured event log.
pub async fn run_acceptance_test_with_publisher<F, Fut>(publisher: Arc<dyn EventPublisher>, test: F)
where
    F: Fn(AcceptanceTestContext) -> Fut,
    Fut: Future<Output = ()>,
{
    let config = init_test_config_builder(NONE_CONFIGURATOR).build();

    test(create_context(&config, Some(publisher)).await).await;
}

async fn create_context(
    config: &Configuration,
    publisher: Option<Arc<dyn EventPublisher>>,
) -> AcceptanceTestContext {
    let pool = create_pool(config.db()).await.unwrap();
    migrate(&pool).await.unwrap();

    let user_repository = create_user_repository(pool.clone());
    let role_repository = create_role_repository(pool.clone());
    let menu_repository = create_menu_repository(pool.clone());
    let session_store = Arc::new(InMemorySessionStore::new());
    let streams = config.messaging().streams().clone();

    let (events, event_log) = match (publisher, config.messaging().engine()) {
        (Some(publisher), _) => (EventEmitter::new(publisher, streams.clone()), None),
        (None, MessagingEngine::None) => (EventEmitter::disabled(), None),
        (None, _) => {
            let log = Arc::new(InMemoryEventLog::new());
            log.provision(&streams.all()).await.unwrap();

            (EventEmitter::new(log.clone(), streams.clone()), Some(log))
        }
    };

    let hasher = SchemeAwareHasher::with_scheme(config.app().password_hashing_scheme());
    let token_codec = config.app().token_codec();

    let session_service = Arc::new(SessionService::new(
        user_repository.clone(),
        session_store.clone(),
        token_codec.clone(),
        hasher,
        events.clone(),
    ));
    let user_service = Arc::new(UserService::new(
        user_repository.clone(),
        hasher,
        events.clone(),
        config.app().default_role_id(),
    ));

    let state = ServerState::new(
        config.app().clone(),
        session_service.clone(),
        user_service.clone(),
        role_repository.clone(),
        menu_repository.clone(),
        events,
    );

    AcceptanceTestContext {
        server: create_test_server(state),
        session_service,
        user_service,
        user_repository,
        role_repository,
        menu_repository,
        session_store,
        event_log,
        streams,
        token_codec,
    }
}

pub async fn run_cli_test_with_default<F, Fut>(test: F)
where
    F: Fn(CliTestContext) -> Fut,
    Fut: Future<Output = ()>,
{
    run_cli_test(NONE_CONFIGURATOR, test).await;
}

pub async fn run_cli_test<F, Fut, C>(configurator: C, test: F)
where
    F: Fn(CliTestContext) -> Fut,
    Fut: Future<Output = ()>,
    C: FnOnce(&mut ConfigurationBuilder),
{
    let case = Uuid::new_v4().to_string().replace("-", "_");
    let config = init_test_cli_config_builder(&case, configurator).build();

    let command_factory = CommandFactory::new(&config);

    let pool = create_pool(config.db()).await.unwrap();
    migrate(&pool).await.unwrap();
    let user_repository = create_user_repository(pool.clone());

    test(CliTestContext::new(user_repository, command_factory)).await;

    pool.close().await;
    Sqlite::drop_database(config.db().database_url())
        .await
        .unwrap();
}
