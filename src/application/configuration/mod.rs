pub mod app;
pub mod cache;
pub mod composed;
pub mod database;
pub mod dto;
pub mod messaging;
