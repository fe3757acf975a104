pub mod auth_extractor;
pub mod client_ip;
