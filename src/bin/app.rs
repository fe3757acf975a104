use admin_service::api::routes::routes;
use admin_service::api::server_state::ServerState;
use admin_service::application::configuration::app::EnvNames as AppEnvNames;
use admin_service::application::configuration::composed::Configuration;
use admin_service::application::consumers::{DEFAULT_RETRY_DELAY, spawn_event_consumers};
use admin_service::application::service::event_emitter::EventEmitter;
use admin_service::application::service::session_service::SessionService;
use admin_service::application::service::user_service::{NewUser, UserService};
use admin_service::domain::crypto::SchemeAwareHasher;
use admin_service::domain::event::EventEnvelope;
use admin_service::infrastructure::database::{create_pool, migrate};
use admin_service::infrastructure::message_publisher::{
    EnvelopeHandler, EventLogError, HandlerError, create_messaging,
};
use admin_service::infrastructure::repository::{
    create_menu_repository, create_role_repository, create_user_repository,
};
use admin_service::infrastructure::session_store::create_session_store;
use admin_service::infrastructure::shutdown::shutdown_channel;
use clap::{Parser, Subcommand};
use serde_json::json;
use sqlx::{Pool, Sqlite};
use std::error::Error;
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::signal;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Start the server")]
    Start,
    #[command(about = "Create a user directly in the record store")]
    CreateUser {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        role_id: Option<i64>,
    },
    #[command(about = "Print envelopes read from a stream until interrupted")]
    ConsumeEvents {
        #[arg(short, long)]
        stream: String,
        #[arg(short, long)]
        group: Option<String>,
    },
    #[command(about = "Check that the record store is reachable")]
    HealthCheck,
}

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> ExitCode {
    let config = Configuration::default();
    let cli = Cli::parse();

    setup_logging(&config);

    debug_config(&config);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {}", e);
            eprintln!("Error: {}", e);

            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: Configuration) -> Result<(), Box<dyn Error>> {
    match cli.command.unwrap_or(Commands::Start) {
        Commands::Start => start(config).await,
        Commands::CreateUser {
            username,
            password,
            email,
            role_id,
        } => {
            let pool = init_database(&config).await?;
            let user_service = UserService::new(
                create_user_repository(pool),
                SchemeAwareHasher::with_scheme(config.app().password_hashing_scheme()),
                EventEmitter::disabled(),
                config.app().default_role_id(),
            );

            let user = user_service
                .create_user(NewUser {
                    username,
                    password,
                    email,
                    nickname: None,
                    avatar: None,
                    role_id,
                    status: None,
                })
                .await?;

            println!(
                "User created: {} {} at {}",
                user.id,
                user.username,
                user.created_at.format("%Y-%m-%d %H:%M:%S")
            );

            Ok(())
        }
        Commands::ConsumeEvents { stream, group } => consume_events(&config, stream, group).await,
        Commands::HealthCheck => {
            let pool = init_database(&config).await?;
            sqlx::query("SELECT 1").execute(&pool).await?;
            println!("OK");

            Ok(())
        }
    }
}

async fn init_database(config: &Configuration) -> Result<Pool<Sqlite>, Box<dyn Error>> {
    let pool = create_pool(config.db()).await?;
    migrate(&pool).await?;

    Ok(pool)
}

async fn start(config: Configuration) -> Result<(), Box<dyn Error>> {
    let pool = init_database(&config).await?;
    let user_repository = create_user_repository(pool.clone());
    let role_repository = create_role_repository(pool.clone());
    let menu_repository = create_menu_repository(pool);

    let session_store = create_session_store(config.cache()).await?;
    let messaging = create_messaging(config.messaging()).await;
    let events = EventEmitter::new(
        messaging.publisher(),
        config.messaging().streams().clone(),
    );
    let hasher = SchemeAwareHasher::with_scheme(config.app().password_hashing_scheme());

    let session_service = Arc::new(SessionService::new(
        user_repository.clone(),
        session_store,
        config.app().token_codec(),
        hasher,
        events.clone(),
    ));
    let user_service = Arc::new(UserService::new(
        user_repository,
        hasher,
        events.clone(),
        config.app().default_role_id(),
    ));

    let addr = format!("{}:{}", config.app().host(), config.app().port());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let consumers = messaging.log().map(|log| {
        spawn_event_consumers(
            log,
            config.messaging().streams(),
            config.messaging().groups(),
            DEFAULT_RETRY_DELAY,
        )
    });

    let state = ServerState::new(
        config.app().clone(),
        session_service,
        user_service,
        role_repository,
        menu_repository,
        events.clone(),
    );

    tracing::info!("Server started at {}", &addr);
    events.system_info("Service started", json!({"addr": addr}));

    let served = axum::serve(
        listener,
        routes(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await;

    if let Some(consumers) = consumers {
        consumers.shutdown("server stopped").await;
    }

    served?;
    tracing::info!("Server stopped");

    Ok(())
}

struct PrintingHandler;

impl EnvelopeHandler for PrintingHandler {
    fn handle(&self, envelope: &EventEnvelope) -> Result<(), HandlerError> {
        println!("{}", serde_json::to_string(envelope)?);

        Ok(())
    }
}

async fn consume_events(
    config: &Configuration,
    stream: String,
    group: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let messaging = create_messaging(config.messaging()).await;
    let Some(log) = messaging.log() else {
        println!("No event log configured");
        return Ok(());
    };

    let (trigger, shutdown) = shutdown_channel();

    tokio::spawn(async move {
        shutdown_signal().await;
        trigger.cancel("interrupted");
    });

    let handler = Arc::new(PrintingHandler);
    let consumed = match group {
        Some(group) => log.subscribe(&stream, &group, handler, shutdown).await,
        None => log.subscribe_transient(&stream, handler, shutdown).await,
    };

    match consumed {
        Err(EventLogError::Cancelled(reason)) => {
            println!("Stopped consuming {}: {}", stream, reason);
            Ok(())
        }
        Err(e) => Err(e.into()),
        Ok(()) => Ok(()),
    }
}

fn setup_logging(config: &Configuration) {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_max_level(config.app().log_level())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting admin service");
}

fn debug_config(config: &Configuration) {
    let message = "Configuration loaded successfully";
    for (name, value) in config.envs() {
        match name.as_str() {
            AppEnvNames::SECRET => {
                tracing::debug!(message, env = name, value = "****");
            }
            _ => {
                tracing::debug!(message, env = name, value = %value);
            }
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, starting graceful shutdown"),
            Err(e) => {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                tracing::info!("Received terminate signal, starting graceful shutdown");
            }
            Err(e) => {
                tracing::error!("Failed to listen for terminate signal: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
