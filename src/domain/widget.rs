// Widget domain model
use super::analytics::{
    AnalyticsOverview, DeviceBreakdownPoint, GeoBreakdownPoint, TargetPerformancePoint,
    TimeSeriesPoint, TrafficSourcePoint, UtmBreakdownPoint,
};
use super::period::Period;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Overview,
    TimeSeries,
    Devices,
    Geography,
    TopCountries,
    TrafficSources,
    Utm,
    Targets,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 8] = [
        WidgetKind::Overview,
        WidgetKind::TimeSeries,
        WidgetKind::Devices,
        WidgetKind::Geography,
        WidgetKind::TopCountries,
        WidgetKind::TrafficSources,
        WidgetKind::Utm,
        WidgetKind::Targets,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Overview => "overview",
            WidgetKind::TimeSeries => "time_series",
            WidgetKind::Devices => "devices",
            WidgetKind::Geography => "geography",
            WidgetKind::TopCountries => "top_countries",
            WidgetKind::TrafficSources => "traffic_sources",
            WidgetKind::Utm => "utm",
            WidgetKind::Targets => "targets",
        }
    }
}

impl FromStr for WidgetKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WidgetKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ApiError::InvalidArgument(format!("unknown widget '{}'", s)))
    }
}

/// Payload of a widget, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum WidgetData {
    Overview(AnalyticsOverview),
    TimeSeries(Vec<TimeSeriesPoint>),
    Devices(Vec<DeviceBreakdownPoint>),
    Geography(Vec<GeoBreakdownPoint>),
    TopCountries(Vec<GeoBreakdownPoint>),
    TrafficSources(Vec<TrafficSourcePoint>),
    Utm(Vec<UtmBreakdownPoint>),
    Targets(Vec<TargetPerformancePoint>),
}

impl WidgetData {
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetData::Overview(_) => WidgetKind::Overview,
            WidgetData::TimeSeries(_) => WidgetKind::TimeSeries,
            WidgetData::Devices(_) => WidgetKind::Devices,
            WidgetData::Geography(_) => WidgetKind::Geography,
            WidgetData::TopCountries(_) => WidgetKind::TopCountries,
            WidgetData::TrafficSources(_) => WidgetKind::TrafficSources,
            WidgetData::Utm(_) => WidgetKind::Utm,
            WidgetData::Targets(_) => WidgetKind::Targets,
        }
    }

    /// Number of rows, `None` for the overview record.
    pub fn len(&self) -> Option<usize> {
        match self {
            WidgetData::Overview(_) => None,
            WidgetData::TimeSeries(v) => Some(v.len()),
            WidgetData::Devices(v) => Some(v.len()),
            WidgetData::Geography(v) | WidgetData::TopCountries(v) => Some(v.len()),
            WidgetData::TrafficSources(v) => Some(v.len()),
            WidgetData::Utm(v) => Some(v.len()),
            WidgetData::Targets(v) => Some(v.len()),
        }
    }

    /// Keep at most `top_n` rows. The overview record is left untouched.
    pub fn truncate(mut self, top_n: Option<usize>) -> Self {
        let Some(n) = top_n else {
            return self;
        };
        match &mut self {
            WidgetData::Overview(_) => {}
            WidgetData::TimeSeries(v) => v.truncate(n),
            WidgetData::Devices(v) => v.truncate(n),
            WidgetData::Geography(v) | WidgetData::TopCountries(v) => v.truncate(n),
            WidgetData::TrafficSources(v) => v.truncate(n),
            WidgetData::Utm(v) => v.truncate(n),
            WidgetData::Targets(v) => v.truncate(n),
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetStatus {
    Loading,
    Success,
    Error,
}

/// Where the data shown by a widget came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Fallback,
    External,
    None,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetView {
    pub id: String,
    pub title: String,
    pub kind: WidgetKind,
    pub period: Period,
    pub status: WidgetStatus,
    pub source: DataSource,
    pub data: Option<WidgetData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn devices(n: usize) -> WidgetData {
        WidgetData::Devices(
            (0..n)
                .map(|i| DeviceBreakdownPoint {
                    device: format!("device-{}", i),
                    clicks: i as u64,
                    percentage: None,
                })
                .collect(),
        )
    }

    #[test]
    fn test_truncate_lists_only() {
        assert_eq!(devices(5).truncate(Some(3)).len(), Some(3));
        assert_eq!(devices(2).truncate(Some(3)).len(), Some(2));
        assert_eq!(devices(5).truncate(None).len(), Some(5));

        let overview = WidgetData::Overview(AnalyticsOverview {
            total_clicks: 1,
            unique_clicks: 1,
            total_links: 1,
            active_links: None,
            click_through_rate: None,
            clicks_change: None,
            top_link: None,
        });
        assert_eq!(overview.clone().truncate(Some(0)), overview);
    }

    #[test]
    fn test_widget_data_wire_format() {
        let json = r#"{"kind":"traffic_sources","items":[{"source":"direct","clicks":10}]}"#;
        let data: WidgetData = serde_json::from_str(json).unwrap();
        assert_eq!(data.kind(), WidgetKind::TrafficSources);
        assert_eq!(data.len(), Some(1));
    }

    #[test]
    fn test_widget_kind_parse() {
        for kind in WidgetKind::ALL {
            assert_eq!(kind.as_str().parse::<WidgetKind>().unwrap(), kind);
        }
        assert!("pie".parse::<WidgetKind>().is_err());
    }
}
