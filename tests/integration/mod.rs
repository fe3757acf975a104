mod in_memory_event_log_test;
mod sqlite_menu_repository_test;
mod sqlite_role_repository_test;
mod user_service_test;
