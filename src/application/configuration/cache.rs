use std::collections::HashMap;
use std::env;

pub struct CacheConfigurationBuilder {
    pub engine: Option<String>,
    pub redis_url: Option<String>,
}

impl CacheConfigurationBuilder {
    pub fn new() -> Self {
        CacheConfigurationBuilder {
            engine: None,
            redis_url: None,
        }
    }

    pub fn memory(&mut self) -> &mut Self {
        self.engine = Some("memory".to_string());
        self
    }

    pub fn redis_url(&mut self, value: String) -> &mut Self {
        self.engine = Some("redis".to_string());
        self.redis_url = Some(value);
        self
    }

    pub fn load_env(&mut self) -> &mut Self {
        self.engine = env::var(EnvNames::CACHE_ENGINE).ok();
        self.redis_url = env::var(EnvNames::REDIS_URL).ok();

        self
    }

    pub fn build(&self) -> CacheConfiguration {
        match self.engine.as_deref().map(str::to_lowercase).as_deref() {
            Some("memory") => CacheConfiguration::Memory,
            _ => CacheConfiguration::Redis(
                self.redis_url
                    .clone()
                    .unwrap_or("redis://127.0.0.1:6379/0".to_string()),
            ),
        }
    }
}

impl Default for CacheConfigurationBuilder {
    fn default() -> Self {
        CacheConfigurationBuilder::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheConfiguration {
    Redis(String),
    Memory,
}

impl CacheConfiguration {
    pub fn envs(&self) -> HashMap<String, String> {
        let mut envs = HashMap::new();

        match self {
            CacheConfiguration::Redis(url) => {
                envs.insert(EnvNames::CACHE_ENGINE.to_owned(), "redis".to_owned());
                envs.insert(EnvNames::REDIS_URL.to_owned(), url.clone());
            }
            CacheConfiguration::Memory => {
                envs.insert(EnvNames::CACHE_ENGINE.to_owned(), "memory".to_owned());
            }
        }

        envs
    }
}

pub struct EnvNames;

impl EnvNames {
    pub const CACHE_ENGINE: &'static str = "CACHE_ENGINE";
    pub const REDIS_URL: &'static str = "REDIS_URL";
}
