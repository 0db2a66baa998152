// Analytics API client - typed calls to the external analytics backend
use crate::application::analytics_repository::AnalyticsRepository;
use crate::domain::analytics::{
    AnalyticsOverview, Country, DeviceBreakdownPoint, ExploreRequest, ExploreResponse,
    GeoBreakdownPoint, SeriesResource, TargetPerformancePoint, TimeSeriesPoint,
    TrafficSourcePoint, UtmBreakdownPoint,
};
use crate::domain::period::{Interval, Period};
use crate::domain::workspace::Notification;
use crate::error::Result;
use crate::infrastructure::auth_fetch::AuthFetcher;
use crate::infrastructure::config::prepare_path;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

const OVERVIEW_PATH: &str = "/api/analytics/overview";
const TIME_SERIES_PATH: &str = "/api/analytics/${resource}/time-series";
const DEVICES_PATH: &str = "/api/analytics/devices";
const GEOGRAPHY_PATH: &str = "/api/analytics/geography";
const TOP_COUNTRIES_PATH: &str = "/api/analytics/top-countries";
const TRAFFIC_SOURCES_PATH: &str = "/api/analytics/traffic-sources";
const UTM_PATH: &str = "/api/analytics/utm";
const TARGETS_PATH: &str = "/api/analytics/targets";
const EXPLORE_PATH: &str = "/api/analytics/explore";
const NOTIFICATIONS_PATH: &str = "/api/notifications";
const UNREAD_COUNT_PATH: &str = "/api/notifications/unread-count";
const MARK_READ_PATH: &str = "/api/notifications/${id}/read";
const MARK_ALL_READ_PATH: &str = "/api/notifications/read-all";
const COUNTRIES_PATH: &str = "/api/countries";
const COUNTRY_PATH: &str = "/api/countries/${code}";

#[derive(Clone)]
pub struct AnalyticsApiClient {
    fetcher: AuthFetcher,
}

#[derive(Debug, Deserialize)]
struct UnreadCount {
    count: u64,
}

impl AnalyticsApiClient {
    pub fn new(fetcher: AuthFetcher) -> Self {
        Self { fetcher }
    }

    fn period_query(period: Period) -> Vec<(&'static str, String)> {
        vec![("period", period.to_string())]
    }

    async fn get_for_period<T>(&self, path: &str, period: Period) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.fetcher.get_json(path, &Self::period_query(period)).await
    }
}

#[async_trait]
impl AnalyticsRepository for AnalyticsApiClient {
    async fn overview(&self, period: Period) -> Result<AnalyticsOverview> {
        self.get_for_period(OVERVIEW_PATH, period).await
    }

    async fn time_series(
        &self,
        resource: SeriesResource,
        period: Period,
        interval: Interval,
    ) -> Result<Vec<TimeSeriesPoint>> {
        let vars = HashMap::from([("resource", resource.as_str().to_string())]);
        let path = prepare_path(TIME_SERIES_PATH, &vars);
        let query = [("period", period.to_string()), ("interval", interval.to_string())];
        self.fetcher.get_json(&path, &query).await
    }

    async fn device_breakdown(&self, period: Period) -> Result<Vec<DeviceBreakdownPoint>> {
        self.get_for_period(DEVICES_PATH, period).await
    }

    async fn geo_breakdown(&self, period: Period) -> Result<Vec<GeoBreakdownPoint>> {
        self.get_for_period(GEOGRAPHY_PATH, period).await
    }

    async fn top_countries(&self, period: Period, limit: usize) -> Result<Vec<GeoBreakdownPoint>> {
        let query = [("period", period.to_string()), ("limit", limit.to_string())];
        self.fetcher.get_json(TOP_COUNTRIES_PATH, &query).await
    }

    async fn traffic_sources(&self, period: Period) -> Result<Vec<TrafficSourcePoint>> {
        self.get_for_period(TRAFFIC_SOURCES_PATH, period).await
    }

    async fn utm_breakdown(&self, period: Period, dimension: &str) -> Result<Vec<UtmBreakdownPoint>> {
        let query = [("period", period.to_string()), ("dimension", dimension.to_string())];
        self.fetcher.get_json(UTM_PATH, &query).await
    }

    async fn target_performance(&self, period: Period) -> Result<Vec<TargetPerformancePoint>> {
        self.get_for_period(TARGETS_PATH, period).await
    }

    async fn explore(&self, request: &ExploreRequest) -> Result<ExploreResponse> {
        self.fetcher.post_json(EXPLORE_PATH, request).await
    }

    async fn notifications(&self) -> Result<Vec<Notification>> {
        self.fetcher.get_json(NOTIFICATIONS_PATH, &[]).await
    }

    async fn unread_notification_count(&self) -> Result<u64> {
        let unread: UnreadCount = self.fetcher.get_json(UNREAD_COUNT_PATH, &[]).await?;
        Ok(unread.count)
    }

    async fn mark_notification_read(&self, id: &str) -> Result<()> {
        let vars = HashMap::from([("id", id.to_string())]);
        self.fetcher.post_empty(&prepare_path(MARK_READ_PATH, &vars)).await
    }

    async fn mark_all_notifications_read(&self) -> Result<()> {
        self.fetcher.post_empty(MARK_ALL_READ_PATH).await
    }

    async fn countries(&self) -> Result<Vec<Country>> {
        self.fetcher.get_json(COUNTRIES_PATH, &[]).await
    }

    async fn country(&self, code: &str) -> Result<Country> {
        let vars = HashMap::from([("code", code.to_uppercase())]);
        self.fetcher.get_json(&prepare_path(COUNTRY_PATH, &vars), &[]).await
    }
}
