//! Per-category health scores.
//!
//! Each scorer is an independent pure function. Most land in [0, 100] by
//! construction; only the metabolic and respiratory scores clamp, and only
//! from below. The blood pressure score is deliberately left unclamped and
//! can leave [0, 100] for extreme readings.

use serde::{Deserialize, Serialize};

use super::metrics::{
    ActivityLevel, AlcoholConsumption, Cholesterol, DietType, SmokingStatus, StressLevel,
};
use super::NormalizedMetrics;

/// Sub-scores for one assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub blood_pressure: f64,
    pub heart_rate: f64,
    pub bmi: f64,
    pub metabolic: f64,
    pub respiratory: f64,
    pub lifestyle: f64,
}

impl CategoryScores {
    /// Score every category from normalized metrics.
    #[must_use]
    pub fn compute(metrics: &NormalizedMetrics) -> Self {
        let raw = &metrics.raw;
        Self {
            blood_pressure: blood_pressure(raw.systolic, raw.diastolic),
            heart_rate: heart_rate(raw.heart_rate),
            bmi: bmi(metrics.bmi),
            metabolic: metabolic(raw.glucose_level, &raw.cholesterol),
            respiratory: respiratory(raw.respiratory_rate, raw.oxygen_saturation),
            lifestyle: lifestyle(
                raw.activity_level,
                raw.smoking_status,
                raw.alcohol_consumption,
                raw.sleep_hours,
                raw.stress_level,
                raw.diet_type,
            ),
        }
    }
}

/// Distance from 120/80, averaged over both readings.
#[must_use]
pub fn blood_pressure(systolic: f64, diastolic: f64) -> f64 {
    let systolic_score = 100.0 - (120.0 - systolic).abs();
    let diastolic_score = 100.0 - (80.0 - diastolic).abs();
    (systolic_score + diastolic_score) / 2.0
}

/// Resting heart rate; 60-100 bpm scores by distance from 80.
#[must_use]
pub fn heart_rate(hr: f64) -> f64 {
    if hr < 60.0 {
        70.0
    } else if hr > 100.0 {
        60.0
    } else {
        100.0 - (80.0 - hr).abs()
    }
}

/// Underweight is checked first, then obese, then overweight.
#[must_use]
pub fn bmi(bmi: f64) -> f64 {
    if bmi < 18.5 {
        70.0
    } else if bmi > 30.0 {
        50.0
    } else if bmi > 25.0 {
        80.0
    } else {
        100.0
    }
}

/// Glucose and lipid penalties, floored at zero.
#[must_use]
pub fn metabolic(glucose: f64, cholesterol: &Cholesterol) -> f64 {
    let mut score = 100.0;

    if !(70.0..=140.0).contains(&glucose) {
        score -= 20.0;
    } else if !(80.0..=120.0).contains(&glucose) {
        score -= 10.0;
    }

    if cholesterol.total > 200.0 {
        score -= 10.0;
    }
    if cholesterol.ldl > 130.0 {
        score -= 10.0;
    }
    if cholesterol.hdl < 40.0 {
        score -= 10.0;
    }

    f64::max(score, 0.0)
}

/// Breathing rate and SpO2 penalties, floored at zero.
#[must_use]
pub fn respiratory(rate: f64, spo2: f64) -> f64 {
    let mut score = 100.0;

    if !(12.0..=20.0).contains(&rate) {
        score -= 15.0;
    }

    // Hypoxemia below 90% replaces the milder penalty.
    if spo2 < 90.0 {
        score -= 40.0;
    } else if spo2 < 95.0 {
        score -= 20.0;
    }

    f64::max(score, 0.0)
}

/// Additive lifestyle points; the best answer on every factor totals 100.
#[must_use]
pub fn lifestyle(
    activity: ActivityLevel,
    smoking: SmokingStatus,
    alcohol: AlcoholConsumption,
    sleep_hours: f64,
    stress: StressLevel,
    diet: DietType,
) -> f64 {
    let activity = match activity {
        ActivityLevel::Active => 25.0,
        ActivityLevel::Moderate => 20.0,
        ActivityLevel::Sedentary => 5.0,
        ActivityLevel::Other => 0.0,
    };

    let smoking = match smoking {
        SmokingStatus::NonSmoker => 25.0,
        SmokingStatus::FormerSmoker => 15.0,
        SmokingStatus::CurrentSmoker => 5.0,
        SmokingStatus::Other => 0.0,
    };

    let alcohol = match alcohol {
        AlcoholConsumption::Never => 15.0,
        AlcoholConsumption::Occasional => 10.0,
        AlcoholConsumption::Regular => 5.0,
        AlcoholConsumption::Other => 0.0,
    };

    let sleep = if (7.0..=9.0).contains(&sleep_hours) {
        15.0
    } else if (6.0..=10.0).contains(&sleep_hours) {
        10.0
    } else {
        5.0
    };

    let stress = match stress {
        StressLevel::Low => 10.0,
        StressLevel::Moderate => 7.0,
        StressLevel::High => 3.0,
        StressLevel::Other => 0.0,
    };

    let diet = match diet {
        DietType::Balanced => 10.0,
        DietType::Vegetarian | DietType::Vegan => 8.0,
        DietType::Keto => 7.0,
        DietType::Other => 5.0,
    };

    activity + smoking + alcohol + sleep + stress + diet
}
