pub mod auth_controller;
pub mod events_controller;
pub mod menus_controller;
pub mod roles_controller;
pub mod users_controller;
pub mod utils_controller;
