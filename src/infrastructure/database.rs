use crate::application::configuration::database::DatabaseConfiguration;
use sqlx::migrate::MigrateError;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Error, Pool, Sqlite};
use std::time::Duration;

pub async fn create_pool(config: &DatabaseConfiguration) -> Result<Pool<Sqlite>, Error> {
    let mut options = SqlitePoolOptions::new()
        .max_connections(config.max_connections())
        .acquire_timeout(Duration::from_millis(config.timeout_ms()));

    // An in-memory database lives only as long as its connection.
    if config.database_url().contains(":memory:") {
        options = options
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = options.connect(config.database_url()).await?;

    tracing::debug!(
        url = config.database_url(),
        max_connections = config.max_connections(),
        "Database pool created"
    );

    Ok(pool)
}

pub async fn migrate(pool: &Pool<Sqlite>) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
