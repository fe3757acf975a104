pub mod database;
pub mod event_consumer;
pub mod in_memory_event_log;
pub mod in_memory_session_store;
pub mod message_publisher;
pub mod rabbitmq_event_log;
pub mod redis_session_store;
pub mod repository;
pub mod session_store;
pub mod shutdown;
pub mod sqlite_menu_repository;
pub mod sqlite_role_repository;
pub mod sqlite_user_repository;
