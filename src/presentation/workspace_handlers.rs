//! Mock workspace endpoints used while developing the dashboard.
//!
//! Everything here is served from canned data; nothing is persisted.

use crate::application::workspace_service::ActivityQuery;
use crate::domain::workspace::{Activity, LinkStats, NotificationFeed, Page, QuickAction, UserStats};
use crate::presentation::app_state::AppState;
use crate::presentation::error::AppError;
use crate::presentation::extract::ApiQuery;
use axum::{extract::State, Json};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub time_range: Option<String>,
}

pub async fn list_activities(
    ApiQuery(query): ApiQuery<ActivityQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Page<Activity>>, AppError> {
    let page = state.workspace_service.activities(&query, Utc::now())?;
    Ok(Json(page))
}

pub async fn list_notifications(
    ApiQuery(query): ApiQuery<NotificationQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<NotificationFeed> {
    Json(
        state
            .workspace_service
            .notifications(query.unread_only, Utc::now()),
    )
}

pub async fn list_quick_actions(State(state): State<Arc<AppState>>) -> Json<Vec<QuickAction>> {
    Json(state.workspace_service.quick_actions())
}

pub async fn user_stats(
    ApiQuery(query): ApiQuery<StatsQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<UserStats>, AppError> {
    let stats = state
        .workspace_service
        .user_stats(query.time_range.as_deref())?;
    Ok(Json(stats))
}

pub async fn link_stats(State(state): State<Arc<AppState>>) -> Json<Vec<LinkStats>> {
    Json(state.workspace_service.link_stats(Utc::now()))
}
