// Application state for HTTP handlers
use crate::application::analytics_repository::AnalyticsRepository;
use crate::application::dashboard_service::DashboardService;
use crate::application::session::InMemorySessionStore;
use crate::application::workspace_service::WorkspaceService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub workspace_service: WorkspaceService,
    pub analytics: Arc<dyn AnalyticsRepository>,
    pub sessions: Arc<InMemorySessionStore>,
}
