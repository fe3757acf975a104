pub mod configuration;
pub mod consumers;
pub mod event_dispatcher;
pub mod service;
pub mod worker_pool;
