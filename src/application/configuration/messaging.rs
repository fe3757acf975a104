use crate::application::configuration::app::parse_or_warn;
use crate::domain::event::{ConsumerGroups, EventStreams};
use crate::infrastructure::message_publisher::MessagingEngine;
use std::collections::HashMap;
use std::env;

pub struct MessagingConfigurationBuilder {
    pub engine: Option<MessagingEngine>,
    pub rabbitmq_url: Option<String>,
    pub user_events_stream: Option<String>,
    pub system_logs_stream: Option<String>,
    pub user_events_group: Option<String>,
    pub system_logs_group: Option<String>,
}

impl Default for MessagingConfigurationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MessagingConfigurationBuilder {
    pub fn new() -> Self {
        MessagingConfigurationBuilder {
            engine: None,
            rabbitmq_url: None,
            user_events_stream: None,
            system_logs_stream: None,
            user_events_group: None,
            system_logs_group: None,
        }
    }

    pub fn engine(&mut self, value: MessagingEngine) -> &mut Self {
        self.engine = Some(value);
        self
    }

    pub fn rabbitmq_url(&mut self, value: String) -> &mut Self {
        self.rabbitmq_url = Some(value);
        self
    }

    pub fn user_events_stream(&mut self, value: String) -> &mut Self {
        self.user_events_stream = Some(value);
        self
    }

    pub fn system_logs_stream(&mut self, value: String) -> &mut Self {
        self.system_logs_stream = Some(value);
        self
    }

    pub fn user_events_group(&mut self, value: String) -> &mut Self {
        self.user_events_group = Some(value);
        self
    }

    pub fn system_logs_group(&mut self, value: String) -> &mut Self {
        self.system_logs_group = Some(value);
        self
    }

    pub fn load_env(&mut self) -> &mut Self {
        self.engine = env::var(EnvNames::MESSAGING_ENGINE)
            .ok()
            .and_then(|v| parse_or_warn(EnvNames::MESSAGING_ENGINE, MessagingEngine::try_from(v)));
        self.rabbitmq_url = env::var(EnvNames::RABBITMQ_URL).ok();
        self.user_events_stream = env::var(EnvNames::USER_EVENTS_STREAM).ok();
        self.system_logs_stream = env::var(EnvNames::SYSTEM_LOGS_STREAM).ok();
        self.user_events_group = env::var(EnvNames::USER_EVENTS_GROUP).ok();
        self.system_logs_group = env::var(EnvNames::SYSTEM_LOGS_GROUP).ok();

        self
    }

    pub fn build(&self) -> MessagingConfiguration {
        let default_streams = EventStreams::default();
        let default_groups = ConsumerGroups::default();

        MessagingConfiguration {
            engine: self.engine.unwrap_or_default(),
            rabbitmq_url: self
                .rabbitmq_url
                .clone()
                .unwrap_or("amqp://localhost:5672".to_string()),
            streams: EventStreams {
                user_events: self
                    .user_events_stream
                    .clone()
                    .unwrap_or(default_streams.user_events),
                system_logs: self
                    .system_logs_stream
                    .clone()
                    .unwrap_or(default_streams.system_logs),
            },
            groups: ConsumerGroups {
                user_events: self
                    .user_events_group
                    .clone()
                    .unwrap_or(default_groups.user_events),
                system_logs: self
                    .system_logs_group
                    .clone()
                    .unwrap_or(default_groups.system_logs),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct MessagingConfiguration {
    engine: MessagingEngine,
    rabbitmq_url: String,
    streams: EventStreams,
    groups: ConsumerGroups,
}

impl MessagingConfiguration {
    pub fn engine(&self) -> MessagingEngine {
        self.engine
    }

    pub fn rabbitmq_url(&self) -> &str {
        &self.rabbitmq_url
    }

    pub fn streams(&self) -> &EventStreams {
        &self.streams
    }

    pub fn groups(&self) -> &ConsumerGroups {
        &self.groups
    }

    pub fn envs(&self) -> HashMap<String, String> {
        let mut envs = HashMap::new();

        envs.insert(
            EnvNames::MESSAGING_ENGINE.to_owned(),
            self.engine.to_string(),
        );
        envs.insert(EnvNames::RABBITMQ_URL.to_owned(), self.rabbitmq_url.clone());
        envs.insert(
            EnvNames::USER_EVENTS_STREAM.to_owned(),
            self.streams.user_events.clone(),
        );
        envs.insert(
            EnvNames::SYSTEM_LOGS_STREAM.to_owned(),
            self.streams.system_logs.clone(),
        );
        envs.insert(
            EnvNames::USER_EVENTS_GROUP.to_owned(),
            self.groups.user_events.clone(),
        );
        envs.insert(
            EnvNames::SYSTEM_LOGS_GROUP.to_owned(),
            self.groups.system_logs.clone(),
        );

        envs
    }
}

pub struct EnvNames;

impl EnvNames {
    pub const MESSAGING_ENGINE: &'static str = "MESSAGING_ENGINE";
    pub const RABBITMQ_URL: &'static str = "RABBITMQ_URL";
    pub const USER_EVENTS_STREAM: &'static str = "USER_EVENTS_STREAM";
    pub const SYSTEM_LOGS_STREAM: &'static str = "SYSTEM_LOGS_STREAM";
    pub const USER_EVENTS_GROUP: &'static str = "USER_EVENTS_GROUP";
    pub const SYSTEM_LOGS_GROUP: &'static str = "SYSTEM_LOGS_GROUP";
}
