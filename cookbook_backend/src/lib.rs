pub mod app_config;
pub mod auth_service;
pub mod session_token;
