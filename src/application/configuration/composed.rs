use crate::application::configuration::app::{AppConfiguration, AppConfigurationBuilder};
use crate::application::configuration::cache::{CacheConfiguration, CacheConfigurationBuilder};
use crate::application::configuration::database::{
    DatabaseConfiguration, DatabaseConfigurationBuilder,
};
use crate::application::configuration::messaging::{
    MessagingConfiguration, MessagingConfigurationBuilder,
};
use dotenvy::{dotenv, from_filename};
use std::collections::HashMap;

#[derive(Default)]
pub struct ConfigurationBuilder {
    pub app: AppConfigurationBuilder,
    pub db: DatabaseConfigurationBuilder,
    pub cache: CacheConfigurationBuilder,
    pub messaging: MessagingConfigurationBuilder,
}

impl ConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_env(&mut self) -> &mut Self {
        self.app.load_env();
        self.db.load_env();
        self.cache.load_env();
        self.messaging.load_env();

        self
    }

    pub fn build(&self) -> Configuration {
        Configuration {
            app: self.app.build(),
            db: self.db.build(),
            cache: self.cache.build(),
            messaging: self.messaging.build(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Configuration {
    app: AppConfiguration,
    db: DatabaseConfiguration,
    cache: CacheConfiguration,
    messaging: MessagingConfiguration,
}

impl Configuration {
    pub fn envs(&self) -> HashMap<String, String> {
        let mut envs = HashMap::new();
        envs.extend(self.app.envs());
        envs.extend(self.db.envs());
        envs.extend(self.cache.envs());
        envs.extend(self.messaging.envs());

        envs
    }

    pub fn app(&self) -> &AppConfiguration {
        &self.app
    }

    pub fn db(&self) -> &DatabaseConfiguration {
        &self.db
    }

    pub fn cache(&self) -> &CacheConfiguration {
        &self.cache
    }

    pub fn messaging(&self) -> &MessagingConfiguration {
        &self.messaging
    }
}

impl Default for Configuration {
    fn default() -> Self {
        from_filename(".env.local").or(dotenv()).ok();

        ConfigurationBuilder::new().load_env().build()
    }
}
