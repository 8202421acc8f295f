//! Composite score, status label and the assessment record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::normalize::normalize;
use super::risk::RiskLevel;
use super::{AssessmentError, CategoryScores, HealthMetrics, NormalizedMetrics, RiskEstimates};

/// Overall health classification derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl HealthStatus {
    /// Map a composite score to a status. Each band includes its lower bound.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::Excellent
        } else if score >= 75.0 {
            Self::Good
        } else if score >= 60.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent - All tracked indicators in healthy ranges",
            Self::Good => "Good - Minor deviations worth monitoring",
            Self::Fair => "Fair - Several indicators outside healthy ranges",
            Self::Poor => "Poor - Medical follow-up recommended",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Poor => write!(f, "Poor"),
            Self::Fair => write!(f, "Fair"),
            Self::Good => write!(f, "Good"),
            Self::Excellent => write!(f, "Excellent"),
        }
    }
}

/// Weighted composite of blood pressure, heart rate, BMI and lifestyle.
///
/// Metabolic and respiratory scores do not contribute. Not clamped.
#[must_use]
pub fn overall_score(scores: &CategoryScores) -> f64 {
    scores.blood_pressure * 0.3 + scores.heart_rate * 0.2 + scores.bmi * 0.2 + scores.lifestyle * 0.3
}

/// One immutable scored snapshot of a user's metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// Owner of the record, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// When the assessment was produced
    pub assessed_at: DateTime<Utc>,

    /// Input snapshot including derived BMI
    pub metrics: NormalizedMetrics,

    pub scores: CategoryScores,
    pub risks: RiskEstimates,

    /// Composite score, typically 0-100
    pub overall_score: f64,

    pub health_status: HealthStatus,
}

impl Assessment {
    /// Run the full engine over one set of metrics.
    ///
    /// The result depends only on `metrics` and `assessed_at`.
    ///
    /// # Errors
    /// Returns `InvalidInput` if any metric is out of its domain.
    pub fn evaluate(
        metrics: &HealthMetrics,
        assessed_at: DateTime<Utc>,
    ) -> Result<Self, AssessmentError> {
        let metrics = normalize(metrics)?;
        let scores = CategoryScores::compute(&metrics);
        let risks = RiskEstimates::compute(&metrics, &scores);
        let overall_score = overall_score(&scores);

        Ok(Self {
            user_id: None,
            assessed_at,
            metrics,
            scores,
            risks,
            overall_score,
            health_status: HealthStatus::from_score(overall_score),
        })
    }

    /// Attach the owning user.
    #[must_use]
    pub fn for_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    #[must_use]
    pub fn bmi(&self) -> f64 {
        self.metrics.bmi
    }

    #[must_use]
    pub fn medical_conditions(&self) -> &[String] {
        &self.metrics.raw.medical_conditions
    }

    #[must_use]
    pub fn family_history(&self) -> &str {
        &self.metrics.raw.family_history
    }

    /// Classification of each risk estimate, keyed by risk name.
    #[must_use]
    pub fn risk_levels(&self) -> Vec<(&'static str, RiskLevel)> {
        self.risks
            .entries()
            .into_iter()
            .map(|(name, value)| (name, RiskLevel::from_risk(value)))
            .collect()
    }
}
