// Period tokens and their default time-series intervals
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Relative time window for analytics queries, e.g. `"7d"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    OneDay,
    #[default]
    SevenDays,
    FourteenDays,
    ThirtyDays,
    NinetyDays,
    HalfYear,
    Year,
}

/// Bucket size of a time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Hour,
    Day,
    Week,
    Month,
}

impl Period {
    pub const ALL: [Period; 7] = [
        Period::OneDay,
        Period::SevenDays,
        Period::FourteenDays,
        Period::ThirtyDays,
        Period::NinetyDays,
        Period::HalfYear,
        Period::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneDay => "1d",
            Period::SevenDays => "7d",
            Period::FourteenDays => "14d",
            Period::ThirtyDays => "30d",
            Period::NinetyDays => "90d",
            Period::HalfYear => "180d",
            Period::Year => "365d",
        }
    }

    /// Interval the time-series selector switches to when this preset is picked.
    pub fn default_interval(&self) -> Interval {
        match self {
            Period::OneDay => Interval::Hour,
            Period::SevenDays | Period::FourteenDays | Period::ThirtyDays => Interval::Day,
            Period::NinetyDays | Period::HalfYear => Interval::Week,
            Period::Year => Interval::Month,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ApiError::InvalidArgument(format!("unknown period '{}'", s)))
    }
}

impl TryFrom<String> for Period {
    type Error = ApiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.as_str().to_string()
    }
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Hour => "hour",
            Interval::Day => "day",
            Interval::Week => "week",
            Interval::Month => "month",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
