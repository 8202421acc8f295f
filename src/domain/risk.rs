//! Disease risk estimates.
//!
//! Every estimate is a sum of non-negative weighted terms capped at 100.
//! The values are ordinal severity indicators, not calibrated probabilities.

use serde::{Deserialize, Serialize};

use super::metrics::{ActivityLevel, Sex};
use super::{CategoryScores, NormalizedMetrics};

/// Upper bound shared by every risk estimate.
pub const MAX_RISK: f64 = 100.0;

/// Blood pressure score below which vascular terms use their high weight.
const POOR_BLOOD_PRESSURE_SCORE: f64 = 70.0;

/// Risk estimates for one assessment, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskEstimates {
    pub heart_disease: f64,
    pub stroke: f64,
    pub diabetes: f64,
    pub obesity: f64,
    pub hypertension: f64,
}

impl RiskEstimates {
    /// Estimate every risk from metrics, their scores and medical history.
    #[must_use]
    pub fn compute(metrics: &NormalizedMetrics, scores: &CategoryScores) -> Self {
        let raw = &metrics.raw;
        let conditions = &raw.medical_conditions;
        Self {
            heart_disease: heart_disease(
                raw.age,
                raw.sex,
                metrics.bmi,
                scores.blood_pressure,
                conditions,
            ),
            stroke: stroke(raw.age, scores.blood_pressure, conditions),
            diabetes: diabetes(metrics.bmi, &raw.family_history, conditions),
            obesity: obesity(metrics.bmi, raw.activity_level),
            hypertension: hypertension(raw.systolic, raw.diastolic, raw.age),
        }
    }

    /// Estimates paired with their display names, in a stable order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("heartDisease", self.heart_disease),
            ("stroke", self.stroke),
            ("diabetes", self.diabetes),
            ("obesity", self.obesity),
            ("hypertension", self.hypertension),
        ]
    }
}

fn has(conditions: &[String], tag: &str) -> bool {
    conditions.iter().any(|c| c == tag)
}

fn cap(risk: f64) -> f64 {
    risk.min(MAX_RISK)
}

#[must_use]
pub fn heart_disease(
    age: u32,
    sex: Sex,
    bmi: f64,
    blood_pressure_score: f64,
    conditions: &[String],
) -> f64 {
    let mut risk = 0.0;
    risk += if age > 50 { 30.0 } else { 10.0 };
    risk += if sex == Sex::Male { 20.0 } else { 15.0 };
    risk += if bmi > 25.0 { 20.0 } else { 10.0 };
    risk += if blood_pressure_score < POOR_BLOOD_PRESSURE_SCORE { 30.0 } else { 10.0 };
    if has(conditions, "heartDisease") {
        risk += 40.0;
    }
    cap(risk)
}

#[must_use]
pub fn stroke(age: u32, blood_pressure_score: f64, conditions: &[String]) -> f64 {
    let mut risk = 0.0;
    risk += if age > 60 { 35.0 } else { 15.0 };
    risk += if blood_pressure_score < POOR_BLOOD_PRESSURE_SCORE { 35.0 } else { 15.0 };
    if has(conditions, "hypertension") {
        risk += 30.0;
    }
    cap(risk)
}

/// Family history is matched case-insensitively on the word `diabetes`.
#[must_use]
pub fn diabetes(bmi: f64, family_history: &str, conditions: &[String]) -> f64 {
    let mut risk = 0.0;
    risk += if bmi > 30.0 { 40.0 } else { 20.0 };
    if family_history.to_lowercase().contains("diabetes") {
        risk += 30.0;
    }
    if has(conditions, "diabetes") {
        risk += 40.0;
    }
    cap(risk)
}

#[must_use]
pub fn obesity(bmi: f64, activity: ActivityLevel) -> f64 {
    let weight_term = if bmi > 30.0 {
        50.0
    } else if bmi > 25.0 {
        30.0
    } else {
        10.0
    };
    let activity_term = match activity {
        ActivityLevel::Sedentary => 30.0,
        ActivityLevel::Moderate => 15.0,
        ActivityLevel::Active | ActivityLevel::Other => 5.0,
    };
    cap(weight_term + activity_term)
}

#[must_use]
pub fn hypertension(systolic: f64, diastolic: f64, age: u32) -> f64 {
    let mut risk = 0.0;
    risk += if systolic > 140.0 || diastolic > 90.0 { 40.0 } else { 20.0 };
    risk += if age > 50 { 30.0 } else { 15.0 };
    cap(risk)
}

/// Coarse classification of a single risk estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Below 30
    Low,
    /// 30 up to 60
    Moderate,
    /// 60 and above
    High,
}

impl RiskLevel {
    /// Bucket a 0-100 risk estimate.
    #[must_use]
    pub fn from_risk(risk: f64) -> Self {
        if risk < 30.0 {
            Self::Low
        } else if risk < 60.0 {
            Self::Moderate
        } else {
            Self::High
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - No significant indicators",
            Self::Moderate => "Moderate risk - Follow-up recommended",
            Self::High => "High risk - Consultation advised",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::High => write!(f, "HIGH"),
        }
    }
}
