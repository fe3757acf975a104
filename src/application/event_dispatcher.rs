use crate::domain::event::{EventEnvelope, EventKind};
use crate::infrastructure::message_publisher::{EnvelopeHandler, HandlerError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

pub type EventHandlerFn = Arc<dyn Fn(&EventEnvelope) -> Result<(), HandlerError> + Send + Sync>;

/// Routes envelopes to handlers by their type tag. Unknown tags are logged and accepted.
#[derive(Clone)]
pub struct EventDispatcher {
    name: String,
    handlers: HashMap<String, EventHandlerFn>,
}

impl EventDispatcher {
    pub fn new(name: impl Into<String>) -> Self {
        EventDispatcher {
            name: name.into(),
            handlers: HashMap::new(),
        }
    }

    pub fn register<F>(mut self, event_type: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&EventEnvelope) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(event_type.into(), Arc::new(handler));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handles(&self, event_type: &str) -> bool {
        self.handlers.contains_key(event_type)
    }

    pub fn dispatch(&self, envelope: &EventEnvelope) -> Result<(), HandlerError> {
        match self.handlers.get(&envelope.event_type) {
            Some(handler) => handler(envelope),
            None => {
                tracing::warn!(
                    dispatcher = self.name.as_str(),
                    "No handler for event type {}, dropping",
                    envelope.event_type
                );

                Ok(())
            }
        }
    }

    pub fn user_events() -> Self {
        EventDispatcher::new("user_events")
            .register(EventKind::UserLogin.as_str(), on_user_login)
            .register(EventKind::UserLogout.as_str(), on_user_logout)
            .register(EventKind::UserRegister.as_str(), on_user_register)
            .register(EventKind::UserUpdate.as_str(), on_user_update)
            .register(EventKind::UserDelete.as_str(), on_user_delete)
    }

    pub fn system_logs() -> Self {
        EventDispatcher::new("system_logs")
            .register(EventKind::SystemError.as_str(), on_system_error)
            .register(EventKind::SystemInfo.as_str(), on_system_info)
    }
}

impl EnvelopeHandler for EventDispatcher {
    fn handle(&self, envelope: &EventEnvelope) -> Result<(), HandlerError> {
        self.dispatch(envelope)
    }
}

fn field(envelope: &EventEnvelope, name: &str) -> String {
    match envelope.data.get(name) {
        Some(Value::String(value)) => value.clone(),
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}

fn on_user_login(envelope: &EventEnvelope) -> Result<(), HandlerError> {
    tracing::info!(
        user_id = %field(envelope, "user_id"),
        username = %field(envelope, "username"),
        ip = %field(envelope, "ip"),
        at = %envelope.timestamp,
        "User logged in"
    );

    Ok(())
}

fn on_user_logout(envelope: &EventEnvelope) -> Result<(), HandlerError> {
    tracing::info!(
        user_id = %field(envelope, "user_id"),
        username = %field(envelope, "username"),
        at = %envelope.timestamp,
        "User logged out"
    );

    Ok(())
}

fn on_user_register(envelope: &EventEnvelope) -> Result<(), HandlerError> {
    tracing::info!(
        user_id = %field(envelope, "user_id"),
        username = %field(envelope, "username"),
        email = %field(envelope, "email"),
        "User registered"
    );

    Ok(())
}

fn on_user_update(envelope: &EventEnvelope) -> Result<(), HandlerError> {
    tracing::info!(
        user_id = %field(envelope, "user_id"),
        fields = %field(envelope, "fields"),
        "User updated"
    );

    Ok(())
}

fn on_user_delete(envelope: &EventEnvelope) -> Result<(), HandlerError> {
    tracing::info!(
        user_id = %field(envelope, "user_id"),
        username = %field(envelope, "username"),
        "User deleted"
    );

    Ok(())
}

fn on_system_error(envelope: &EventEnvelope) -> Result<(), HandlerError> {
    tracing::error!(
        service = %field(envelope, "service"),
        details = %field(envelope, "details"),
        "System error reported: {}",
        field(envelope, "error")
    );

    Ok(())
}

fn on_system_info(envelope: &EventEnvelope) -> Result<(), HandlerError> {
    tracing::info!(
        service = %field(envelope, "service"),
        details = %field(envelope, "details"),
        "System info reported: {}",
        field(envelope, "message")
    );

    Ok(())
}
