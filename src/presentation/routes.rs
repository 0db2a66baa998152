// Router setup
use crate::presentation::app_state::AppState;
use crate::presentation::{handlers, workspace_handlers};
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    let workspace = Router::new()
        .route("/activities", get(workspace_handlers::list_activities))
        .route("/notifications", get(workspace_handlers::list_notifications))
        .route("/quick-actions", get(workspace_handlers::list_quick_actions))
        .route("/stats/user", get(workspace_handlers::user_stats))
        .route("/stats/links", get(workspace_handlers::link_stats));

    Router::new()
        .route("/healthz", get(handlers::health_check))
        .route(
            "/session",
            get(handlers::session_status)
                .put(handlers::put_session)
                .delete(handlers::delete_session),
        )
        .route("/dashboards/:period", get(handlers::get_dashboard))
        .route("/widgets/cache", delete(handlers::clear_widget_cache))
        .route(
            "/widgets/:id",
            get(handlers::get_widget).post(handlers::render_supplied_widget),
        )
        .route("/api/analytics/explore", post(handlers::explore))
        .route("/api/notifications", get(handlers::list_notifications))
        .route(
            "/api/notifications/unread-count",
            get(handlers::unread_notification_count),
        )
        .route(
            "/api/notifications/read-all",
            post(handlers::mark_all_notifications_read),
        )
        .route(
            "/api/notifications/:id/read",
            post(handlers::mark_notification_read),
        )
        .route("/api/countries", get(handlers::list_countries))
        .route("/api/countries/:code", get(handlers::get_country))
        .nest("/api/workspace", workspace)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
