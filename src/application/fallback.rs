// Sample datasets shown when a widget's live fetch fails
use crate::domain::analytics::{
    AnalyticsOverview, DeviceBreakdownPoint, GeoBreakdownPoint, TargetPerformancePoint,
    TimeSeriesPoint, TrafficSourcePoint, UtmBreakdownPoint,
};
use crate::domain::widget::{WidgetData, WidgetKind};

pub fn fallback_for(kind: WidgetKind) -> WidgetData {
    match kind {
        WidgetKind::Overview => WidgetData::Overview(overview()),
        WidgetKind::TimeSeries => WidgetData::TimeSeries(time_series()),
        WidgetKind::Devices => WidgetData::Devices(devices()),
        WidgetKind::Geography => WidgetData::Geography(geography()),
        WidgetKind::TopCountries => WidgetData::TopCountries(top_countries()),
        WidgetKind::TrafficSources => WidgetData::TrafficSources(traffic_sources()),
        WidgetKind::Utm => WidgetData::Utm(utm()),
        WidgetKind::Targets => WidgetData::Targets(targets()),
    }
}

fn overview() -> AnalyticsOverview {
    AnalyticsOverview {
        total_clicks: 12_847,
        unique_clicks: 9_312,
        total_links: 48,
        active_links: Some(41),
        click_through_rate: Some(3.8),
        clicks_change: Some(12.5),
        top_link: Some("spring-sale".to_string()),
    }
}

fn time_series() -> Vec<TimeSeriesPoint> {
    [
        ("2024-01-01", 420, 310),
        ("2024-01-02", 515, 388),
        ("2024-01-03", 390, 290),
        ("2024-01-04", 610, 455),
        ("2024-01-05", 720, 530),
        ("2024-01-06", 480, 360),
        ("2024-01-07", 555, 402),
    ]
    .into_iter()
    .map(|(date, clicks, unique)| TimeSeriesPoint::new(date, clicks, Some(unique)))
    .collect()
}

fn devices() -> Vec<DeviceBreakdownPoint> {
    [("Mobile", 6_540, 58.2), ("Desktop", 3_980, 35.4), ("Tablet", 720, 6.4)]
        .into_iter()
        .map(|(device, clicks, pct)| DeviceBreakdownPoint {
            device: device.to_string(),
            clicks,
            percentage: Some(pct),
        })
        .collect()
}

fn geo(rows: &[(&str, &str, u64, f64)]) -> Vec<GeoBreakdownPoint> {
    rows.iter()
        .map(|(country, code, clicks, pct)| GeoBreakdownPoint {
            country: country.to_string(),
            country_code: Some(code.to_string()),
            city: None,
            clicks: *clicks,
            percentage: Some(*pct),
        })
        .collect()
}

fn geography() -> Vec<GeoBreakdownPoint> {
    geo(&[
        ("United States", "US", 4_210, 36.1),
        ("United Kingdom", "GB", 1_530, 13.1),
        ("Germany", "DE", 1_120, 9.6),
        ("France", "FR", 860, 7.4),
        ("Canada", "CA", 790, 6.8),
        ("India", "IN", 640, 5.5),
        ("Brazil", "BR", 410, 3.5),
    ])
}

fn top_countries() -> Vec<GeoBreakdownPoint> {
    geo(&[
        ("United States", "US", 4_210, 36.1),
        ("United Kingdom", "GB", 1_530, 13.1),
        ("Germany", "DE", 1_120, 9.6),
        ("France", "FR", 860, 7.4),
        ("Canada", "CA", 790, 6.8),
    ])
}

fn traffic_sources() -> Vec<TrafficSourcePoint> {
    [
        ("Direct", 4_820, 41.3),
        ("Social", 3_150, 27.0),
        ("Email", 1_870, 16.0),
        ("Search", 1_240, 10.6),
        ("Referral", 590, 5.1),
    ]
    .into_iter()
    .map(|(source, clicks, pct)| TrafficSourcePoint {
        source: source.to_string(),
        clicks,
        percentage: Some(pct),
    })
    .collect()
}

fn utm() -> Vec<UtmBreakdownPoint> {
    [
        ("newsletter", 2_310, 1_840),
        ("twitter", 1_760, 1_390),
        ("facebook", 1_220, 980),
        ("linkedin", 640, 512),
    ]
    .into_iter()
    .map(|(value, clicks, unique)| UtmBreakdownPoint {
        value: value.to_string(),
        clicks,
        unique_clicks: Some(unique),
    })
    .collect()
}

fn targets() -> Vec<TargetPerformancePoint> {
    [
        ("https://shop.example.com/sale", "Mobile users", 3_420, 4.2),
        ("https://shop.example.com/eu", "EU visitors", 1_980, 3.1),
        ("https://shop.example.com", "Default", 1_450, 2.6),
    ]
    .into_iter()
    .map(|(url, rule, clicks, rate)| TargetPerformancePoint {
        target_url: url.to_string(),
        clicks,
        rule_name: Some(rule.to_string()),
        conversion_rate: Some(rate),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_matching_fallback() {
        for kind in WidgetKind::ALL {
            let data = fallback_for(kind);
            assert_eq!(data.kind(), kind);
            if let Some(len) = data.len() {
                assert!(len > 0, "{:?} fallback is empty", kind);
            }
        }
    }
}
