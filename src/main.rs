// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod error;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::analytics_repository::AnalyticsRepository;
use crate::application::dashboard_service::DashboardService;
use crate::application::session::{InMemorySessionStore, Session};
use crate::application::widget_service::WidgetService;
use crate::application::workspace_service::WorkspaceService;
use crate::infrastructure::analytics_client::AnalyticsApiClient;
use crate::infrastructure::auth_fetch::AuthFetcher;
use crate::infrastructure::config::{load_app_config, load_widgets_config};
use crate::presentation::app_state::AppState;
use crate::presentation::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let app_config = load_app_config()?;
    let widgets_config = load_widgets_config()?;

    if let Some(provider) = &app_config.auth.provider_url {
        tracing::info!(
            "Identity provider {} (anon key {})",
            provider,
            if app_config.auth.anon_key.is_some() { "set" } else { "missing" }
        );
    }
    let session = app_config.auth.access_token.clone().map(Session::new);
    if session.is_none() {
        tracing::warn!("No access token configured; analytics calls will fail until one is set");
    }
    let sessions = Arc::new(InMemorySessionStore::new(session));

    // Create analytics client (infrastructure layer)
    let http = reqwest::Client::builder()
        .timeout(app_config.analytics.timeout())
        .build()?;
    let fetcher = AuthFetcher::new(http, &app_config.analytics.base_url, sessions.clone());
    let analytics: Arc<dyn AnalyticsRepository> = Arc::new(AnalyticsApiClient::new(fetcher));

    // Create services (application layer)
    let widget_service = WidgetService::new(
        analytics.clone(),
        widgets_config.cache_ttl(),
        widgets_config.cache_max_entries,
        widgets_config.fallback_on_error,
    );
    let state = Arc::new(AppState {
        dashboard_service: DashboardService::new(widget_service, widgets_config),
        workspace_service: WorkspaceService::new(),
        analytics,
        sessions,
    });

    // Start server
    let addr: SocketAddr = app_config.server.bind.parse()?;
    tracing::info!(
        "Starting smartlink-dashboard on {} (analytics backend {})",
        addr,
        app_config.analytics.base_url
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}
