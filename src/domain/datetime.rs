// Date helpers for datetime-local inputs, link expiry and the activity feed
use crate::error::ApiError;
use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;

const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Convert an RFC 3339 timestamp to the `YYYY-MM-DDTHH:MM` form used by
/// datetime inputs. Times are rendered in UTC.
pub fn format_date_for_input(iso: &str) -> Result<String, ApiError> {
    let parsed = DateTime::parse_from_rfc3339(iso)
        .map_err(|e| ApiError::InvalidArgument(format!("invalid ISO date '{}': {}", iso, e)))?;
    Ok(parsed.with_timezone(&Utc).format(INPUT_FORMAT).to_string())
}

/// Inverse of [`format_date_for_input`]: `YYYY-MM-DDTHH:MM` to an RFC 3339 UTC string.
pub fn format_input_to_iso(input: &str) -> Result<String, ApiError> {
    let naive = NaiveDateTime::parse_from_str(input, INPUT_FORMAT)
        .map_err(|e| ApiError::InvalidArgument(format!("invalid input date '{}': {}", input, e)))?;
    Ok(naive
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Human label for how long ago `ts` happened relative to `now`.
pub fn time_ago(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - ts;
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {} ago", unit)
        } else {
            format!("{} {}s ago", n, unit)
        }
    };

    if elapsed < Duration::minutes(1) {
        "just now".to_string()
    } else if elapsed < Duration::hours(1) {
        plural(elapsed.num_minutes(), "minute")
    } else if elapsed < Duration::days(1) {
        plural(elapsed.num_hours(), "hour")
    } else if elapsed < Duration::days(30) {
        plural(elapsed.num_days(), "day")
    } else {
        ts.format("%b %d, %Y").to_string()
    }
}

/// Remaining lifetime of an expiring link.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TtlProgress {
    pub remaining_seconds: i64,
    pub percent_remaining: f64,
    pub expired: bool,
    pub label: String,
}

impl TtlProgress {
    pub fn compute(created_at: DateTime<Utc>, expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let total = expires_at - created_at;
        let remaining = (expires_at - now).max(Duration::zero());
        let expired = remaining.is_zero();

        let percent_remaining = if total <= Duration::zero() {
            0.0
        } else {
            let ratio = remaining.num_seconds() as f64 / total.num_seconds() as f64;
            (ratio * 100.0).clamp(0.0, 100.0)
        };

        Self {
            remaining_seconds: remaining.num_seconds(),
            percent_remaining,
            expired,
            label: Self::label(remaining),
        }
    }

    fn label(remaining: Duration) -> String {
        if remaining.is_zero() {
            return "Expired".to_string();
        }
        let days = remaining.num_days();
        let hours = remaining.num_hours() % 24;
        let minutes = remaining.num_minutes() % 60;

        if days > 0 {
            format!("{}d {}h left", days, hours)
        } else if hours > 0 {
            format!("{}h {}m left", hours, minutes)
        } else if minutes > 0 {
            format!("{}m left", minutes)
        } else {
            "less than a minute left".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, h, m, 0).unwrap()
    }

    #[test]
    fn test_input_round_trip_to_minute_precision() {
        let samples = [
            "2024-03-15T10:30:00.000Z",
            "2023-12-31T23:59:59Z",
            "2024-02-29T00:00:12.345+02:00",
        ];
        for iso in samples {
            let back = format_input_to_iso(&format_date_for_input(iso).unwrap()).unwrap();
            let original = DateTime::parse_from_rfc3339(iso).unwrap().with_timezone(&Utc);
            let expected = original.with_second(0).unwrap().with_nanosecond(0).unwrap();
            assert_eq!(DateTime::parse_from_rfc3339(&back).unwrap(), expected, "{}", iso);
        }
    }

    #[test]
    fn test_format_date_for_input() {
        assert_eq!(
            format_date_for_input("2024-03-15T10:30:45.123Z").unwrap(),
            "2024-03-15T10:30"
        );
        assert_eq!(
            format_input_to_iso("2024-03-15T10:30").unwrap(),
            "2024-03-15T10:30:00.000Z"
        );
        assert!(format_date_for_input("yesterday").is_err());
        assert!(format_input_to_iso("2024-03-15").is_err());
    }

    #[test]
    fn test_time_ago() {
        let now = at(12, 0);
        assert_eq!(time_ago(at(11, 59), now), "1 minute ago");
        assert_eq!(time_ago(at(11, 15), now), "45 minutes ago");
        assert_eq!(time_ago(at(9, 0), now), "3 hours ago");
        assert_eq!(time_ago(now, now), "just now");
        assert_eq!(time_ago(now - Duration::days(2), now), "2 days ago");
        assert_eq!(time_ago(now - Duration::days(60), now), "Jan 15, 2024");
    }

    #[test]
    fn test_ttl_progress() {
        let created = at(0, 0);
        let expires = created + Duration::days(4);

        let half = TtlProgress::compute(created, expires, created + Duration::days(2));
        assert!(!half.expired);
        assert!((half.percent_remaining - 50.0).abs() < f64::EPSILON);
        assert_eq!(half.label, "2d 0h left");

        let late = TtlProgress::compute(created, expires, expires - Duration::minutes(45));
        assert_eq!(late.label, "45m left");

        let gone = TtlProgress::compute(created, expires, expires + Duration::hours(1));
        assert!(gone.expired);
        assert_eq!(gone.percent_remaining, 0.0);
        assert_eq!(gone.label, "Expired");
    }
}
