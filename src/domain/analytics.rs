// Analytics data models returned by the analytics backend
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    pub total_clicks: u64,
    pub unique_clicks: u64,
    pub total_links: u64,
    #[serde(default)]
    pub active_links: Option<u64>,
    #[serde(default)]
    pub click_through_rate: Option<f64>,
    #[serde(default)]
    pub clicks_change: Option<f64>,
    #[serde(default)]
    pub top_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub date: String,
    pub clicks: u64,
    #[serde(default)]
    pub unique_clicks: Option<u64>,
}

impl TimeSeriesPoint {
    pub fn new(date: impl Into<String>, clicks: u64, unique_clicks: Option<u64>) -> Self {
        Self {
            date: date.into(),
            clicks,
            unique_clicks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceBreakdownPoint {
    pub device: String,
    pub clicks: u64,
    #[serde(default)]
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoBreakdownPoint {
    pub country: String,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    pub clicks: u64,
    #[serde(default)]
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficSourcePoint {
    pub source: String,
    pub clicks: u64,
    #[serde(default)]
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtmBreakdownPoint {
    pub value: String,
    pub clicks: u64,
    #[serde(default)]
    pub unique_clicks: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetPerformancePoint {
    pub target_url: String,
    pub clicks: u64,
    #[serde(default)]
    pub rule_name: Option<String>,
    #[serde(default)]
    pub conversion_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub flag: Option<String>,
}

/// Entity a time series is scoped to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesResource {
    #[default]
    Links,
    Campaigns,
    Groups,
    Tags,
}

impl SeriesResource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesResource::Links => "links",
            SeriesResource::Campaigns => "campaigns",
            SeriesResource::Groups => "groups",
            SeriesResource::Tags => "tags",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExploreFilter {
    pub field: String,
    pub operator: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExploreRequest {
    pub period: String,
    #[serde(default)]
    pub metrics: Vec<String>,
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub filters: Vec<ExploreFilter>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExploreResponse {
    #[serde(default)]
    pub rows: Vec<HashMap<String, Value>>,
    #[serde(default)]
    pub totals: HashMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_optional_fields_default_to_none() {
        let json = r#"{"totalClicks": 120, "uniqueClicks": 80, "totalLinks": 4}"#;
        let overview: AnalyticsOverview = serde_json::from_str(json).unwrap();
        assert_eq!(overview.total_clicks, 120);
        assert_eq!(overview.active_links, None);
        assert_eq!(overview.top_link, None);
    }

    #[test]
    fn test_geo_point_reads_camel_case() {
        let json = r#"{"country": "Germany", "countryCode": "DE", "clicks": 42}"#;
        let point: GeoBreakdownPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.country_code.as_deref(), Some("DE"));
        assert_eq!(point.city, None);
    }
}
