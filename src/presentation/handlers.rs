// HTTP request handlers
use crate::application::session::{Session, SessionStore};
use crate::application::widget_service::WidgetRequest;
use crate::domain::analytics::{Country, ExploreRequest, ExploreResponse};
use crate::domain::dashboard::Dashboard;
use crate::domain::period::{Interval, Period};
use crate::domain::widget::{WidgetData, WidgetView};
use crate::domain::workspace::Notification;
use crate::presentation::app_state::AppState;
use crate::presentation::error::AppError;
use crate::presentation::extract::{ApiJson, ApiQuery};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct RefreshQuery {
    #[serde(default)]
    pub refresh: bool,
}

#[derive(Debug, Deserialize)]
pub struct WidgetQuery {
    pub period: Option<String>,
    pub top_n: Option<usize>,
    pub interval: Option<Interval>,
    #[serde(default)]
    pub refresh: bool,
}

/// Body for rendering a widget from data the caller already has
#[derive(Debug, Deserialize)]
pub struct SuppliedWidget {
    pub period: Option<String>,
    pub top_n: Option<usize>,
    pub data: WidgetData,
}

fn parse_period(raw: Option<&str>) -> Result<Period, AppError> {
    match raw {
        Some(token) => Ok(token.parse()?),
        None => Ok(Period::default()),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Store the access token handed over after sign-in
pub async fn put_session(
    State(state): State<Arc<AppState>>,
    ApiJson(session): ApiJson<Session>,
) -> Result<StatusCode, AppError> {
    if session.access_token.is_empty() {
        return Err(AppError::bad_request("accessToken must not be empty"));
    }
    state.sessions.replace(session).await;
    // cached widgets were fetched on behalf of the previous session
    state.dashboard_service.invalidate().await;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_session(State(state): State<Arc<AppState>>) -> StatusCode {
    state.sessions.clear().await;
    state.dashboard_service.invalidate().await;
    StatusCode::NO_CONTENT
}

pub async fn session_status(State(state): State<Arc<AppState>>) -> Json<Value> {
    let session = state.sessions.current_session().await;
    Json(json!({
        "authenticated": session.is_some(),
        "userId": session.as_ref().and_then(|s| s.user_id.clone()),
        "expiresAt": session.as_ref().and_then(|s| s.expires_at),
    }))
}

/// Every configured widget for one period
pub async fn get_dashboard(
    Path(period): Path<String>,
    ApiQuery(query): ApiQuery<RefreshQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Dashboard>, AppError> {
    let period = parse_period(Some(&period))?;
    let dashboard = state
        .dashboard_service
        .get_dashboard(period, query.refresh)
        .await;
    Ok(Json(dashboard))
}

pub async fn get_widget(
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<WidgetQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<WidgetView>, AppError> {
    let request = WidgetRequest {
        period: parse_period(query.period.as_deref())?,
        top_n: query.top_n,
        interval: query.interval,
        refresh: query.refresh,
        supplied: None,
    };
    let view = state.dashboard_service.get_widget(&id, request).await?;
    Ok(Json(view))
}

pub async fn render_supplied_widget(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<SuppliedWidget>,
) -> Result<Json<WidgetView>, AppError> {
    let request = WidgetRequest {
        period: parse_period(body.period.as_deref())?,
        top_n: body.top_n,
        supplied: Some(body.data),
        ..WidgetRequest::default()
    };
    let view = state.dashboard_service.get_widget(&id, request).await?;
    Ok(Json(view))
}

pub async fn clear_widget_cache(State(state): State<Arc<AppState>>) -> Json<Value> {
    let cleared = state.dashboard_service.invalidate().await;
    Json(json!({ "cleared": cleared }))
}

pub async fn explore(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<ExploreRequest>,
) -> Result<Json<ExploreResponse>, AppError> {
    // reject bad periods here rather than upstream
    parse_period(Some(&request.period))?;
    Ok(Json(state.analytics.explore(&request).await?))
}

pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Notification>>, AppError> {
    Ok(Json(state.analytics.notifications().await?))
}

pub async fn unread_notification_count(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let count = state.analytics.unread_notification_count().await?;
    Ok(Json(json!({ "count": count })))
}

pub async fn mark_notification_read(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, AppError> {
    state.analytics.mark_notification_read(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark_all_notifications_read(
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, AppError> {
    state.analytics.mark_all_notifications_read().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_countries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Country>>, AppError> {
    Ok(Json(state.analytics.countries().await?))
}

pub async fn get_country(
    Path(code): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Country>, AppError> {
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::bad_request(format!("invalid country code '{}'", code)));
    }
    Ok(Json(state.analytics.country(&code).await?))
}
