use crate::application::configuration::app::parse_or_warn;
use std::collections::HashMap;
use std::env;

pub struct DatabaseConfigurationBuilder {
    pub database_url: Option<String>,
    pub database_max_connections: Option<u32>,
    pub database_timeout_ms: Option<u64>,
}

impl DatabaseConfigurationBuilder {
    pub fn new() -> Self {
        DatabaseConfigurationBuilder {
            database_url: None,
            database_max_connections: None,
            database_timeout_ms: None,
        }
    }

    pub fn database_url(&mut self, value: String) -> &mut Self {
        self.database_url = Some(value);
        self
    }

    pub fn database_max_connections(&mut self, value: u32) -> &mut Self {
        self.database_max_connections = Some(value);
        self
    }

    pub fn database_timeout_ms(&mut self, value: u64) -> &mut Self {
        self.database_timeout_ms = Some(value);
        self
    }

    pub fn load_env(&mut self) -> &mut Self {
        self.database_url = env::var(EnvNames::DATABASE_URL)
            .ok()
            .filter(|url| !url.is_empty());
        self.database_max_connections = env::var(EnvNames::DATABASE_MAX_CONNECTIONS)
            .ok()
            .and_then(|v| parse_or_warn(EnvNames::DATABASE_MAX_CONNECTIONS, v.parse::<u32>()));
        self.database_timeout_ms = env::var(EnvNames::DATABASE_TIMEOUT_MS)
            .ok()
            .and_then(|v| parse_or_warn(EnvNames::DATABASE_TIMEOUT_MS, v.parse::<u64>()));

        self
    }

    pub fn build(&self) -> DatabaseConfiguration {
        DatabaseConfiguration {
            database_url: self
                .database_url
                .clone()
                .unwrap_or("sqlite://admin.db?mode=rwc".to_string()),
            max_connections: self.database_max_connections.unwrap_or(5).max(1),
            timeout_ms: self.database_timeout_ms.unwrap_or(5000),
        }
    }
}

impl Default for DatabaseConfigurationBuilder {
    fn default() -> Self {
        DatabaseConfigurationBuilder::new()
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfiguration {
    database_url: String,
    max_connections: u32,
    timeout_ms: u64,
}

impl DatabaseConfiguration {
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn envs(&self) -> HashMap<String, String> {
        let mut envs = HashMap::new();

        envs.insert(EnvNames::DATABASE_URL.to_owned(), self.database_url.clone());
        envs.insert(
            EnvNames::DATABASE_MAX_CONNECTIONS.to_owned(),
            self.max_connections.to_string(),
        );
        envs.insert(
            EnvNames::DATABASE_TIMEOUT_MS.to_owned(),
            self.timeout_ms.to_string(),
        );

        envs
    }
}

pub struct EnvNames;

impl EnvNames {
    pub const DATABASE_URL: &'static str = "DATABASE_URL";
    pub const DATABASE_MAX_CONNECTIONS: &'static str = "DATABASE_MAX_CONNECTIONS";
    pub const DATABASE_TIMEOUT_MS: &'static str = "DATABASE_TIMEOUT_MS";
}
