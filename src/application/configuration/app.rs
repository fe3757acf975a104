use crate::application::configuration::dto::{DurationInSeconds, HiddenString};
use crate::domain::crypto::HashingScheme;
use crate::domain::token::{DEFAULT_TOKEN_TTL_IN_SECONDS, SigningAlgorithm, TokenCodec};
use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use tracing::Level;

pub struct AppConfigurationBuilder {
    pub secret: Option<String>,
    pub token_algorithm: Option<SigningAlgorithm>,
    pub session_ttl_in_seconds: Option<DurationInSeconds>,
    pub password_hashing_scheme: Option<HashingScheme>,
    pub default_role_id: Option<i64>,
    pub port: Option<String>,
    pub host: Option<String>,
    pub log_level: Option<Level>,
}

impl AppConfigurationBuilder {
    pub fn new() -> Self {
        AppConfigurationBuilder {
            secret: None,
            token_algorithm: None,
            session_ttl_in_seconds: None,
            password_hashing_scheme: None,
            default_role_id: None,
            port: None,
            host: None,
            log_level: None,
        }
    }

    pub fn secret(&mut self, value: String) -> &mut Self {
        self.secret = Some(value);
        self
    }

    pub fn token_algorithm(&mut self, value: SigningAlgorithm) -> &mut Self {
        self.token_algorithm = Some(value);
        self
    }

    pub fn session_ttl_in_seconds(&mut self, value: DurationInSeconds) -> &mut Self {
        self.session_ttl_in_seconds = Some(value);
        self
    }

    pub fn password_hashing_scheme(&mut self, value: HashingScheme) -> &mut Self {
        self.password_hashing_scheme = Some(value);
        self
    }

    pub fn default_role_id(&mut self, value: i64) -> &mut Self {
        self.default_role_id = Some(value);
        self
    }

    pub fn port(&mut self, value: String) -> &mut Self {
        self.port = Some(value);
        self
    }

    pub fn host(&mut self, value: String) -> &mut Self {
        self.host = Some(value);
        self
    }

    pub fn log_level(&mut self, value: Level) -> &mut Self {
        self.log_level = Some(value);
        self
    }

    pub fn load_env(&mut self) -> &mut Self {
        self.secret = env::var(EnvNames::SECRET).ok();
        self.token_algorithm = env::var(EnvNames::TOKEN_ALGORITHM)
            .ok()
            .and_then(|v| parse_or_warn(EnvNames::TOKEN_ALGORITHM, SigningAlgorithm::try_from(v)));
        self.session_ttl_in_seconds = env::var(EnvNames::SESSION_TTL_IN_SECONDS)
            .ok()
            .and_then(|v| {
                parse_or_warn(EnvNames::SESSION_TTL_IN_SECONDS, DurationInSeconds::try_from(v))
            });
        self.password_hashing_scheme = env::var(EnvNames::PASSWORD_HASHING_SCHEME)
            .ok()
            .and_then(|v| parse_or_warn(EnvNames::PASSWORD_HASHING_SCHEME, HashingScheme::try_from(v)));
        self.default_role_id = env::var(EnvNames::DEFAULT_ROLE_ID)
            .ok()
            .and_then(|v| parse_or_warn(EnvNames::DEFAULT_ROLE_ID, v.parse::<i64>()));
        self.port = env::var(EnvNames::PORT).ok();
        self.host = env::var(EnvNames::HOST).ok();
        self.log_level = env::var(EnvNames::LOG_LEVEL)
            .ok()
            .and_then(|v| parse_or_warn(EnvNames::LOG_LEVEL, Level::from_str(&v)));

        self
    }

    pub fn build(&self) -> AppConfiguration {
        AppConfiguration {
            secret: HiddenString::from(self.secret.clone().unwrap_or("change-me".to_string())),
            token_algorithm: self.token_algorithm.unwrap_or_default(),
            session_ttl_in_seconds: self
                .session_ttl_in_seconds
                .unwrap_or(DurationInSeconds(DEFAULT_TOKEN_TTL_IN_SECONDS)),
            password_hashing_scheme: self.password_hashing_scheme.unwrap_or_default(),
            default_role_id: self.default_role_id.unwrap_or(2),
            port: self.port.clone().unwrap_or("8080".to_string()),
            host: self.host.clone().unwrap_or("0.0.0.0".to_string()),
            log_level: self.log_level.unwrap_or(Level::INFO),
        }
    }
}

impl Default for AppConfigurationBuilder {
    fn default() -> Self {
        AppConfigurationBuilder::new()
    }
}

pub(crate) fn parse_or_warn<T, E: std::fmt::Display>(name: &str, parsed: Result<T, E>) -> Option<T> {
    match parsed {
        Ok(value) => Some(value),
        Err(e) => {
            eprintln!("Ignoring invalid {}: {}", name, e);
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfiguration {
    secret: HiddenString,
    token_algorithm: SigningAlgorithm,
    session_ttl_in_seconds: DurationInSeconds,
    password_hashing_scheme: HashingScheme,
    default_role_id: i64,
    port: String,
    host: String,
    log_level: Level,
}

impl AppConfiguration {
    pub fn secret(&self) -> &HiddenString {
        &self.secret
    }

    pub fn token_algorithm(&self) -> SigningAlgorithm {
        self.token_algorithm
    }

    pub fn session_ttl_in_seconds(&self) -> DurationInSeconds {
        self.session_ttl_in_seconds
    }

    pub fn password_hashing_scheme(&self) -> HashingScheme {
        self.password_hashing_scheme
    }

    pub fn default_role_id(&self) -> i64 {
        self.default_role_id
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn log_level(&self) -> Level {
        self.log_level
    }

    pub fn token_codec(&self) -> TokenCodec {
        TokenCodec::new(
            self.secret.as_bytes(),
            self.token_algorithm,
            self.session_ttl_in_seconds.to_chrono(),
        )
    }

    pub fn envs(&self) -> HashMap<String, String> {
        let mut envs = HashMap::new();

        envs.insert(EnvNames::SECRET.to_owned(), self.secret.as_str().to_string());
        envs.insert(
            EnvNames::TOKEN_ALGORITHM.to_owned(),
            self.token_algorithm.to_string(),
        );
        envs.insert(
            EnvNames::SESSION_TTL_IN_SECONDS.to_owned(),
            self.session_ttl_in_seconds.seconds().to_string(),
        );
        envs.insert(
            EnvNames::PASSWORD_HASHING_SCHEME.to_owned(),
            self.password_hashing_scheme.to_string(),
        );
        envs.insert(
            EnvNames::DEFAULT_ROLE_ID.to_owned(),
            self.default_role_id.to_string(),
        );
        envs.insert(EnvNames::PORT.to_owned(), self.port.clone());
        envs.insert(EnvNames::HOST.to_owned(), self.host.clone());
        envs.insert(EnvNames::LOG_LEVEL.to_owned(), self.log_level.to_string());

        envs
    }
}

pub struct EnvNames;

impl EnvNames {
    pub const SECRET: &'static str = "SECRET";
    pub const TOKEN_ALGORITHM: &'static str = "TOKEN_ALGORITHM";
    pub const SESSION_TTL_IN_SECONDS: &'static str = "SESSION_TTL_IN_SECONDS";
    pub const PASSWORD_HASHING_SCHEME: &'static str = "PASSWORD_HASHING_SCHEME";
    pub const DEFAULT_ROLE_ID: &'static str = "DEFAULT_ROLE_ID";
    pub const PORT: &'static str = "PORT";
    pub const HOST: &'static str = "HOST";
    pub const LOG_LEVEL: &'static str = "LOG_LEVEL";
}
