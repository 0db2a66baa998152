// Application layer - Use cases and the ports they depend on
pub mod analytics_repository;
pub mod dashboard_service;
pub mod fallback;
pub mod remote_resource;
pub mod session;
pub mod widget_service;
pub mod workspace_service;
