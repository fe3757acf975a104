pub mod crypto;
pub mod error;
pub mod event;
pub mod menu;
pub mod repositories;
pub mod role;
pub mod session;
pub mod token;
pub mod user;
