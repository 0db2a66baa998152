// Repository trait for analytics data access
use crate::domain::analytics::{
    AnalyticsOverview, Country, DeviceBreakdownPoint, ExploreRequest, ExploreResponse,
    GeoBreakdownPoint, SeriesResource, TargetPerformancePoint, TimeSeriesPoint,
    TrafficSourcePoint, UtmBreakdownPoint,
};
use crate::domain::period::{Interval, Period};
use crate::domain::workspace::Notification;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    async fn overview(&self, period: Period) -> Result<AnalyticsOverview>;

    async fn time_series(
        &self,
        resource: SeriesResource,
        period: Period,
        interval: Interval,
    ) -> Result<Vec<TimeSeriesPoint>>;

    async fn device_breakdown(&self, period: Period) -> Result<Vec<DeviceBreakdownPoint>>;

    async fn geo_breakdown(&self, period: Period) -> Result<Vec<GeoBreakdownPoint>>;

    /// Countries ordered by clicks, at most `limit` of them
    async fn top_countries(&self, period: Period, limit: usize) -> Result<Vec<GeoBreakdownPoint>>;

    async fn traffic_sources(&self, period: Period) -> Result<Vec<TrafficSourcePoint>>;

    /// Breakdown by one UTM parameter (`utm_source`, `utm_medium`, ...)
    async fn utm_breakdown(&self, period: Period, dimension: &str) -> Result<Vec<UtmBreakdownPoint>>;

    async fn target_performance(&self, period: Period) -> Result<Vec<TargetPerformancePoint>>;

    async fn explore(&self, request: &ExploreRequest) -> Result<ExploreResponse>;

    async fn notifications(&self) -> Result<Vec<Notification>>;

    async fn unread_notification_count(&self) -> Result<u64>;

    async fn mark_notification_read(&self, id: &str) -> Result<()>;

    async fn mark_all_notifications_read(&self) -> Result<()>;

    async fn countries(&self) -> Result<Vec<Country>>;

    async fn country(&self, code: &str) -> Result<Country>;
}
