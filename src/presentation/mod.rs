// Presentation layer - HTTP surface
pub mod app_state;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod workspace_handlers;
