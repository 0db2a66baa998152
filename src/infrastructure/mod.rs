// Infrastructure layer - External dependencies and adapters
pub mod analytics_client;
pub mod auth_fetch;
pub mod config;
