// Workspace service - Canned workspace feeds for local development
use crate::domain::datetime::{format_date_for_input, format_input_to_iso, time_ago, TtlProgress};
use crate::domain::workspace::{
    Activity, LinkStats, Notification, NotificationFeed, Page, QuickAction, UserStats,
};
use crate::error::{ApiError, Result};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::Rng;
use serde::Deserialize;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Lower bound in datetime-input form (`YYYY-MM-DDTHH:MM`, UTC)
    pub since: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Day,
    Week,
    Month,
    Year,
}

impl TimeRange {
    fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Day => "day",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
        }
    }
}

impl FromStr for TimeRange {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "day" => Ok(TimeRange::Day),
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            "year" => Ok(TimeRange::Year),
            other => Err(ApiError::InvalidArgument(format!(
                "unknown time_range '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WorkspaceService;

impl WorkspaceService {
    pub fn new() -> Self {
        Self
    }

    /// Filtered activity feed, newest first, one page at a time.
    pub fn activities(&self, query: &ActivityQuery, now: DateTime<Utc>) -> Result<Page<Activity>> {
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = query.offset.unwrap_or(0);
        let since = match &query.since {
            Some(input) => Some(parse_input_date(input)?),
            None => None,
        };

        let mut items: Vec<Activity> = sample_activities(now)
            .into_iter()
            .filter(|a| query.kind.as_deref().is_none_or(|k| a.kind == k))
            .filter(|a| since.is_none_or(|s| a.timestamp >= s))
            .map(|mut a| {
                a.relative_time = Some(time_ago(a.timestamp, now));
                a
            })
            .collect();
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(Page::slice(&items, limit, offset))
    }

    pub fn notifications(&self, unread_only: bool, now: DateTime<Utc>) -> NotificationFeed {
        let all = sample_notifications(now);
        let unread_count = all.iter().filter(|n| !n.read).count();
        let notifications = all
            .into_iter()
            .filter(|n| !unread_only || !n.read)
            .collect();
        NotificationFeed {
            notifications,
            unread_count,
        }
    }

    pub fn quick_actions(&self) -> Vec<QuickAction> {
        [
            ("create-link", "Create link", "Shorten a new URL", "/links/new", "link"),
            ("new-campaign", "New campaign", "Group links under a campaign", "/campaigns/new", "megaphone"),
            ("view-analytics", "View analytics", "Open the analytics dashboard", "/analytics", "chart"),
            ("manage-tags", "Manage tags", "Organise links with tags", "/tags", "tag"),
        ]
        .into_iter()
        .map(|(id, title, description, href, icon)| QuickAction {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            href: href.to_string(),
            icon: icon.to_string(),
        })
        .collect()
    }

    pub fn user_stats(&self, time_range: Option<&str>) -> Result<UserStats> {
        let range = time_range.unwrap_or("week").parse::<TimeRange>()?;
        let (total_links, total_clicks, active_campaigns, click_growth) = match range {
            TimeRange::Day => (3, 142, 2, 4.5),
            TimeRange::Week => (12, 1_024, 4, 12.3),
            TimeRange::Month => (27, 4_310, 6, 8.7),
            TimeRange::Year => (48, 38_902, 11, 21.4),
        };
        Ok(UserStats {
            time_range: range.as_str().to_string(),
            total_links,
            total_clicks,
            active_campaigns,
            click_growth,
        })
    }

    /// Per-link counters, regenerated on every call.
    pub fn link_stats(&self, now: DateTime<Utc>) -> Vec<LinkStats> {
        let mut rng = rand::thread_rng();
        let links = [
            ("link-1", "spring-sale", Some((10, 20))),
            ("link-2", "newsletter", None),
            ("link-3", "launch", Some((2, 5))),
            ("link-4", "docs", None),
        ];

        links
            .into_iter()
            .map(|(id, code, lifetime)| {
                let clicks: u64 = rng.gen_range(50..5_000);
                let unique_clicks = rng.gen_range(clicks / 2..=clicks);
                let window = lifetime.map(|(age_days, ttl_days)| {
                    let created = now - Duration::days(age_days);
                    (created, created + Duration::days(ttl_days))
                });
                let expires_at = window.map(|(_, expires)| expires);
                LinkStats {
                    link_id: id.to_string(),
                    short_code: code.to_string(),
                    clicks,
                    unique_clicks,
                    expires_at,
                    expires_at_input: expires_at.and_then(|e| {
                        format_date_for_input(&e.to_rfc3339_opts(SecondsFormat::Secs, true)).ok()
                    }),
                    ttl: window.map(|(created, expires)| TtlProgress::compute(created, expires, now)),
                }
            })
            .collect()
    }
}

fn parse_input_date(input: &str) -> Result<DateTime<Utc>> {
    let iso = format_input_to_iso(input)?;
    DateTime::parse_from_rfc3339(&iso)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| ApiError::InvalidArgument(e.to_string()))
}

fn sample_activities(now: DateTime<Utc>) -> Vec<Activity> {
    [
        ("act-1", "link_created", "Link created", "Created short link /spring-sale", 5, Some("link-1")),
        ("act-2", "link_clicked", "Milestone reached", "/spring-sale passed 1,000 clicks", 42, Some("link-1")),
        ("act-3", "campaign_created", "Campaign created", "Started campaign \"Spring launch\"", 180, None),
        ("act-4", "link_updated", "Link updated", "Changed destination of /newsletter", 360, Some("link-2")),
        ("act-5", "link_created", "Link created", "Created short link /launch", 1_500, Some("link-3")),
        ("act-6", "tag_added", "Tag added", "Tagged /docs with \"docs\"", 2_900, Some("link-4")),
        ("act-7", "link_clicked", "Traffic spike", "/launch received 300 clicks in an hour", 4_400, Some("link-3")),
        ("act-8", "link_created", "Link created", "Created short link /docs", 10_080, Some("link-4")),
    ]
    .into_iter()
    .map(|(id, kind, title, description, minutes_ago, link_id)| Activity {
        id: id.to_string(),
        kind: kind.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        timestamp: now - Duration::minutes(minutes_ago),
        link_id: link_id.map(str::to_string),
        relative_time: None,
    })
    .collect()
}

fn sample_notifications(now: DateTime<Utc>) -> Vec<Notification> {
    [
        ("n-1", "Link expiring soon", "/launch expires in 3 days", "warning", false, 30, Some("/links/link-3")),
        ("n-2", "Weekly report ready", "Your weekly click report is available", "info", false, 720, Some("/analytics")),
        ("n-3", "Campaign milestone", "\"Spring launch\" reached 5,000 clicks", "success", true, 2_880, None),
    ]
    .into_iter()
    .map(|(id, title, message, kind, read, minutes_ago, action_url)| Notification {
        id: id.to_string(),
        title: title.to_string(),
        message: message.to_string(),
        kind: kind.to_string(),
        read,
        created_at: now - Duration::minutes(minutes_ago),
        action_url: action_url.map(str::to_string),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: Option<usize>, offset: Option<usize>, kind: Option<&str>) -> ActivityQuery {
        ActivityQuery {
            limit,
            offset,
            kind: kind.map(str::to_string),
            since: None,
        }
    }

    #[test]
    fn test_activities_pagination() {
        let service = WorkspaceService::new();
        let page = service
            .activities(&query(Some(2), Some(0), None), Utc::now())
            .unwrap();
        assert!(page.data.len() <= 2);
        assert_eq!(page.total, 8);
        assert!(page.has_more);
    }

    #[test]
    fn test_activities_total_counts_filtered_items() {
        let service = WorkspaceService::new();
        let page = service
            .activities(&query(Some(2), Some(0), Some("link_created")), Utc::now())
            .unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.total, 3);
        assert!(page.data.iter().all(|a| a.kind == "link_created"));

        let rest = service
            .activities(&query(Some(2), Some(2), Some("link_created")), Utc::now())
            .unwrap();
        assert_eq!(rest.data.len(), 1);
        assert!(!rest.has_more);
    }

    #[test]
    fn test_activities_newest_first_with_relative_time() {
        let service = WorkspaceService::new();
        let page = service.activities(&ActivityQuery::default(), Utc::now()).unwrap();
        assert!(page
            .data
            .windows(2)
            .all(|w| w[0].timestamp >= w[1].timestamp));
        assert_eq!(page.data[0].relative_time.as_deref(), Some("5 minutes ago"));
    }

    #[test]
    fn test_activities_limit_is_clamped() {
        let service = WorkspaceService::new();
        let page = service
            .activities(&query(Some(0), None, None), Utc::now())
            .unwrap();
        assert_eq!(page.limit, 1);
        assert_eq!(page.data.len(), 1);
    }

    #[test]
    fn test_activities_since_filter() {
        let service = WorkspaceService::new();
        let now = Utc::now();
        let since = format_date_for_input(
            &(now - Duration::hours(2)).to_rfc3339_opts(SecondsFormat::Secs, true),
        )
        .unwrap();
        let mut q = ActivityQuery {
            since: Some(since),
            ..ActivityQuery::default()
        };

        let page = service.activities(&q, now).unwrap();
        assert_eq!(page.total, 2);

        q.since = Some("last tuesday".to_string());
        assert!(service.activities(&q, now).is_err());
    }

    #[test]
    fn test_user_stats_day() {
        let stats = WorkspaceService::new().user_stats(Some("day")).unwrap();
        assert_eq!(stats.total_links, 3);
        assert_eq!(stats.time_range, "day");
    }

    #[test]
    fn test_user_stats_defaults_to_week_and_rejects_unknown() {
        let service = WorkspaceService::new();
        assert_eq!(service.user_stats(None).unwrap().time_range, "week");
        assert!(service.user_stats(Some("decade")).is_err());
    }

    #[test]
    fn test_notifications_unread_only() {
        let feed = WorkspaceService::new().notifications(true, Utc::now());
        assert_eq!(feed.unread_count, 2);
        assert_eq!(feed.notifications.len(), 2);
        assert!(feed.notifications.iter().all(|n| !n.read));
    }

    #[test]
    fn test_link_stats_bounds_and_ttl() {
        let now = Utc::now();
        let stats = WorkspaceService::new().link_stats(now);
        assert_eq!(stats.len(), 4);
        for link in &stats {
            assert!(link.unique_clicks <= link.clicks);
            assert_eq!(link.ttl.is_some(), link.expires_at.is_some());
        }
        // created 10 days ago with a 20 day lifetime
        let ttl = stats[0].ttl.as_ref().unwrap();
        assert!(!ttl.expired);
        assert_eq!(ttl.label, "10d 0h left");
        // created 2 days ago with a 5 day lifetime
        assert_eq!(stats[2].ttl.as_ref().unwrap().label, "3d 0h left");
    }
}
