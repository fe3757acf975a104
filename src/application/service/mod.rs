pub mod event_emitter;
pub mod session_service;
pub mod user_service;
