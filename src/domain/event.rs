use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Typed, timestamped, schema-free payload appended to a stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventEnvelope {
    #[serde(rename = "type")]
    pub event_type: String,
    pub timestamp: DateTime<Utc>,
    #[schema(value_type = Object)]
    pub data: Map<String, Value>,
}

impl EventEnvelope {
    pub fn now(event_type: impl Into<String>, data: Map<String, Value>) -> Self {
        EventEnvelope {
            event_type: event_type.into(),
            timestamp: Utc::now(),
            data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    UserEvents,
    SystemLogs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    UserLogin,
    UserLogout,
    UserRegister,
    UserUpdate,
    UserDelete,
    SystemError,
    SystemInfo,
}

impl EventKind {
    pub const ALL: [EventKind; 7] = [
        EventKind::UserLogin,
        EventKind::UserLogout,
        EventKind::UserRegister,
        EventKind::UserUpdate,
        EventKind::UserDelete,
        EventKind::SystemError,
        EventKind::SystemInfo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::UserLogin => "user_login",
            EventKind::UserLogout => "user_logout",
            EventKind::UserRegister => "user_register",
            EventKind::UserUpdate => "user_update",
            EventKind::UserDelete => "user_delete",
            EventKind::SystemError => "system_error",
            EventKind::SystemInfo => "system_info",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        EventKind::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    pub fn stream(&self) -> StreamKind {
        match self {
            EventKind::SystemError | EventKind::SystemInfo => StreamKind::SystemLogs,
            _ => StreamKind::UserEvents,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventStreams {
    pub user_events: String,
    pub system_logs: String,
}

impl EventStreams {
    pub fn name(&self, kind: StreamKind) -> &str {
        match kind {
            StreamKind::UserEvents => &self.user_events,
            StreamKind::SystemLogs => &self.system_logs,
        }
    }

    pub fn all(&self) -> [&str; 2] {
        [&self.user_events, &self.system_logs]
    }

    /// Pairs every stream with the consumer group that reads it.
    pub fn with_groups<'a>(&'a self, groups: &'a ConsumerGroups) -> [(&'a str, &'a str); 2] {
        [
            (self.user_events.as_str(), groups.user_events.as_str()),
            (self.system_logs.as_str(), groups.system_logs.as_str()),
        ]
    }
}

impl Default for EventStreams {
    fn default() -> Self {
        EventStreams {
            user_events: "user_events".to_string(),
            system_logs: "system_logs".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerGroups {
    pub user_events: String,
    pub system_logs: String,
}

impl Default for ConsumerGroups {
    fn default() -> Self {
        ConsumerGroups {
            user_events: "admin-service-group".to_string(),
            system_logs: "admin-service-system-group".to_string(),
        }
    }
}
