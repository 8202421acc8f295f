//! Longitudinal trend analysis across assessments.
//!
//! Trends compare the oldest and newest assessment of a chronologically
//! ordered history. Intermediate entries only show up in [`TrendSeries`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Assessment, AssessmentError};

/// Percent change beyond which a metric counts as moving.
pub const DEFAULT_THRESHOLD_PCT: f64 = 5.0;

/// Direction of change between two readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Increasing => write!(f, "increasing"),
            Self::Decreasing => write!(f, "decreasing"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

/// Relative change from `old` to `new`, in percent.
///
/// `None` when `old` is zero, since the ratio is undefined there.
#[must_use]
pub fn percent_change(old: f64, new: f64) -> Option<f64> {
    if old == 0.0 {
        None
    } else {
        Some((new - old) / old * 100.0)
    }
}

/// Classify a change against a symmetric percentage threshold.
///
/// A zero baseline falls back to the sign of the difference. Non-finite
/// readings are reported as stable.
#[must_use]
pub fn classify(old: f64, new: f64, threshold_pct: f64) -> TrendDirection {
    if !old.is_finite() || !new.is_finite() {
        return TrendDirection::Stable;
    }

    match percent_change(old, new) {
        Some(change) if change > threshold_pct => TrendDirection::Increasing,
        Some(change) if change < -threshold_pct => TrendDirection::Decreasing,
        Some(_) => TrendDirection::Stable,
        None if new > old => TrendDirection::Increasing,
        None if new < old => TrendDirection::Decreasing,
        None => TrendDirection::Stable,
    }
}

/// Direction of each tracked metric between the first and last assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthTrends {
    #[serde(rename = "weightTrend")]
    pub bmi: TrendDirection,
    #[serde(rename = "bpTrend")]
    pub systolic: TrendDirection,
    #[serde(rename = "glucoseTrend")]
    pub glucose: TrendDirection,
    #[serde(rename = "overallTrend")]
    pub overall: TrendDirection,
}

impl HealthTrends {
    /// Metric names paired with their direction.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, TrendDirection); 4] {
        [
            ("bmi", self.bmi),
            ("systolic", self.systolic),
            ("glucoseLevel", self.glucose),
            ("overallScore", self.overall),
        ]
    }
}

/// Compare the oldest and newest entries of `history` (oldest first).
///
/// # Errors
/// Returns `InsufficientHistory` when fewer than two assessments are given.
pub fn analyze(history: &[Assessment], threshold_pct: f64) -> Result<HealthTrends, AssessmentError> {
    let (first, last) = match history {
        [first, .., last] => (first, last),
        _ => {
            return Err(AssessmentError::InsufficientHistory {
                available: history.len(),
            })
        }
    };

    let old = &first.metrics.raw;
    let new = &last.metrics.raw;

    Ok(HealthTrends {
        bmi: classify(first.bmi(), last.bmi(), threshold_pct),
        systolic: classify(old.systolic, new.systolic, threshold_pct),
        glucose: classify(old.glucose_level, new.glucose_level, threshold_pct),
        overall: classify(first.overall_score, last.overall_score, threshold_pct),
    })
}

/// A single dated value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: DateTime<Utc>,
    pub value: f64,
}

/// A dated blood pressure reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloodPressurePoint {
    pub date: DateTime<Utc>,
    pub systolic: f64,
    pub diastolic: f64,
}

/// Per-assessment values over a window, for charting by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSeries {
    pub overall_score: Vec<SeriesPoint>,
    pub bmi: Vec<SeriesPoint>,
    pub blood_pressure: Vec<BloodPressurePoint>,
    pub lifestyle: Vec<SeriesPoint>,
}

impl TrendSeries {
    /// Build series in the order given; callers pass chronological history.
    #[must_use]
    pub fn from_history(history: &[Assessment]) -> Self {
        let mut series = Self::default();
        for a in history {
            let date = a.assessed_at;
            series.overall_score.push(SeriesPoint {
                date,
                value: a.overall_score,
            });
            series.bmi.push(SeriesPoint {
                date,
                value: a.bmi(),
            });
            series.blood_pressure.push(BloodPressurePoint {
                date,
                systolic: a.metrics.raw.systolic,
                diastolic: a.metrics.raw.diastolic,
            });
            series.lifestyle.push(SeriesPoint {
                date,
                value: a.scores.lifestyle,
            });
        }
        series
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.overall_score.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overall_score.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metrics::fixtures::*;
    use crate::domain::HealthMetrics;
    use chrono::{Duration, TimeZone};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0)
            .single()
            .expect("Should build timestamp")
    }

    /// Assessment whose BMI is exactly `bmi` (height fixed at 200 cm).
    fn assessment_with_bmi(bmi: f64, day: i64) -> Assessment {
        let metrics = HealthMetrics {
            height: 200.0,
            weight: bmi * 4.0,
            ..healthy_female()
        };
        Assessment::evaluate(&metrics, base_time() + Duration::days(day)).expect("Should evaluate")
    }

    #[test]
    fn test_classify_threshold() {
        assert_eq!(classify(25.0, 27.0, 5.0), TrendDirection::Increasing);
        assert_eq!(classify(25.0, 24.0, 5.0), TrendDirection::Stable);
        assert_eq!(classify(100.0, 94.0, 5.0), TrendDirection::Decreasing);
        assert_eq!(classify(100.0, 105.0, 5.0), TrendDirection::Stable);
        assert_eq!(classify(100.0, 95.0, 5.0), TrendDirection::Stable);
    }

    #[test]
    fn test_classify_zero_baseline() {
        assert_eq!(percent_change(0.0, 10.0), None);
        assert_eq!(classify(0.0, 10.0, 5.0), TrendDirection::Increasing);
        assert_eq!(classify(0.0, -3.0, 5.0), TrendDirection::Decreasing);
        assert_eq!(classify(0.0, 0.0, 5.0), TrendDirection::Stable);
    }

    #[test]
    fn test_classify_negative_baseline_follows_formula() {
        // (-5 - -10) / -10 = -50%
        assert_eq!(classify(-10.0, -5.0, 5.0), TrendDirection::Decreasing);
    }

    #[test]
    fn test_classify_non_finite_is_stable() {
        assert_eq!(classify(f64::NAN, 10.0, 5.0), TrendDirection::Stable);
        assert_eq!(classify(10.0, f64::INFINITY, 5.0), TrendDirection::Stable);
    }

    #[test]
    fn test_bmi_trend_increasing() {
        let history = [assessment_with_bmi(25.0, 0), assessment_with_bmi(27.0, 30)];
        let trends = analyze(&history, DEFAULT_THRESHOLD_PCT).expect("Should analyze");
        assert_eq!(trends.bmi, TrendDirection::Increasing);
        assert_eq!(trends.systolic, TrendDirection::Stable);
        assert_eq!(trends.glucose, TrendDirection::Stable);
    }

    #[test]
    fn test_entries_name_each_metric() {
        let history = [assessment_with_bmi(25.0, 0), assessment_with_bmi(27.0, 30)];
        let trends = analyze(&history, DEFAULT_THRESHOLD_PCT).expect("Should analyze");

        assert_eq!(
            trends.entries(),
            [
                ("bmi", TrendDirection::Increasing),
                ("systolic", TrendDirection::Stable),
                ("glucoseLevel", TrendDirection::Stable),
                ("overallScore", trends.overall),
            ]
        );
    }

    #[test]
    fn test_bmi_trend_stable_within_threshold() {
        let history = [assessment_with_bmi(25.0, 0), assessment_with_bmi(24.0, 30)];
        let trends = analyze(&history, DEFAULT_THRESHOLD_PCT).expect("Should analyze");
        assert_eq!(trends.bmi, TrendDirection::Stable);
    }

    #[test]
    fn test_compares_endpoints_only() {
        let history = [
            assessment_with_bmi(25.0, 0),
            assessment_with_bmi(35.0, 10),
            assessment_with_bmi(25.5, 20),
        ];
        let trends = analyze(&history, DEFAULT_THRESHOLD_PCT).expect("Should analyze");
        assert_eq!(trends.bmi, TrendDirection::Stable);
    }

    #[test]
    fn test_insufficient_history() {
        assert!(matches!(
            analyze(&[], DEFAULT_THRESHOLD_PCT),
            Err(AssessmentError::InsufficientHistory { available: 0 })
        ));
        let single = [assessment_with_bmi(25.0, 0)];
        assert!(matches!(
            analyze(&single, DEFAULT_THRESHOLD_PCT),
            Err(AssessmentError::InsufficientHistory { available: 1 })
        ));
    }

    #[test]
    fn test_overall_and_systolic_trends() {
        let first = Assessment::evaluate(&healthy_female(), base_time()).expect("Should evaluate");
        let last = Assessment::evaluate(&hypertensive_male(), base_time() + Duration::days(90))
            .expect("Should evaluate");

        let trends = analyze(&[first, last], DEFAULT_THRESHOLD_PCT).expect("Should analyze");
        assert_eq!(trends.systolic, TrendDirection::Increasing);
        assert_eq!(trends.glucose, TrendDirection::Increasing);
        assert_eq!(trends.overall, TrendDirection::Decreasing);
    }

    #[test]
    fn test_trends_serialize_with_summary_keys() {
        let history = [assessment_with_bmi(25.0, 0), assessment_with_bmi(27.0, 30)];
        let trends = analyze(&history, DEFAULT_THRESHOLD_PCT).expect("Should analyze");
        let value = serde_json::to_value(trends).expect("Should serialize");

        assert_eq!(value["weightTrend"], "increasing");
        assert_eq!(value["bpTrend"], "stable");
    }

    #[test]
    fn test_series_follow_history_order() {
        let history = [
            assessment_with_bmi(25.0, 0),
            assessment_with_bmi(26.0, 10),
            assessment_with_bmi(27.0, 20),
        ];
        let series = TrendSeries::from_history(&history);

        assert_eq!(series.len(), 3);
        assert!(series.bmi.windows(2).all(|w| w[0].date < w[1].date));
        assert!((series.bmi[2].value - 27.0).abs() < 1e-9);
        assert_eq!(series.blood_pressure[0].systolic, 120.0);
        assert!(TrendSeries::from_history(&[]).is_empty());
    }
}
