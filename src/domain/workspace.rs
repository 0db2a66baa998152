// Workspace feed models (activities, notifications, quick actions, stats)
use super::datetime::TtlProgress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub link_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub action_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickAction {
    pub id: String,
    pub title: String,
    pub description: String,
    pub href: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub time_range: String,
    pub total_links: u64,
    pub total_clicks: u64,
    pub active_campaigns: u64,
    pub click_growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStats {
    pub link_id: String,
    pub short_code: String,
    pub clicks: u64,
    pub unique_clicks: u64,
    pub expires_at: Option<DateTime<Utc>>,
    /// `expires_at` in datetime-input form, for the edit form
    pub expires_at_input: Option<String>,
    pub ttl: Option<TtlProgress>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFeed {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

/// One page of a filtered collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

impl<T: Clone> Page<T> {
    /// Slice `items` (already filtered) into a page; `total` is the full count.
    pub fn slice(items: &[T], limit: usize, offset: usize) -> Self {
        let total = items.len();
        let data: Vec<T> = items.iter().skip(offset).take(limit).cloned().collect();
        let has_more = offset + data.len() < total;
        Self {
            data,
            total,
            limit,
            offset,
            has_more,
        }
    }
}
