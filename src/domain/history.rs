//! Time windows over a user's assessment history.

use std::str::FromStr;

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use super::AssessmentError;

/// Named look-back period for trend reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1month")]
    OneMonth,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[default]
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "1year")]
    OneYear,
}

impl Timeframe {
    #[must_use]
    pub fn months(&self) -> u32 {
        match self {
            Self::OneMonth => 1,
            Self::ThreeMonths => 3,
            Self::SixMonths => 6,
            Self::OneYear => 12,
        }
    }

    /// First instant inside the window ending at `now`, in calendar months.
    #[must_use]
    pub fn start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_months(Months::new(self.months()))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMonth => "1month",
            Self::ThreeMonths => "3months",
            Self::SixMonths => "6months",
            Self::OneYear => "1year",
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1month" => Ok(Self::OneMonth),
            "3months" => Ok(Self::ThreeMonths),
            "6months" => Ok(Self::SixMonths),
            "1year" => Ok(Self::OneYear),
            other => Err(AssessmentError::InvalidInput(format!(
                "Unknown timeframe '{other}': expected 1month, 3months, 6months or 1year"
            ))),
        }
    }
}

/// Filter applied when loading history from a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryWindow {
    /// Every stored assessment
    All,
    /// The last `n` days up to now
    LastDays(u32),
    Timeframe(Timeframe),
}

impl HistoryWindow {
    /// Whether `at` falls inside the window ending at `now`. Bounds are inclusive.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let start = match self {
            Self::All => return true,
            Self::LastDays(days) => now
                .checked_sub_signed(Duration::days(i64::from(*days)))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            Self::Timeframe(timeframe) => timeframe.start(now),
        };
        start <= at && at <= now
    }
}

impl From<Timeframe> for HistoryWindow {
    fn from(timeframe: Timeframe) -> Self {
        Self::Timeframe(timeframe)
    }
}
