//! Health metric input types.
//!
//! Field names on the wire match the assessment request body
//! (`heartRate`, `glucoseLevel`, `medicalConditions`, ...).

use serde::{Deserialize, Serialize};

/// Biological sex category used by the heart disease estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Sex {
    Male,
    Female,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLevel {
    Sedentary,
    Moderate,
    Active,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SmokingStatus {
    NonSmoker,
    FormerSmoker,
    CurrentSmoker,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlcoholConsumption {
    Never,
    Occasional,
    Regular,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StressLevel {
    Low,
    Moderate,
    High,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DietType {
    Balanced,
    Vegetarian,
    Vegan,
    Keto,
    #[serde(other)]
    Other,
}

/// Lipid panel in mg/dL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cholesterol {
    pub total: f64,
    pub hdl: f64,
    pub ldl: f64,
}

/// Raw metrics submitted for one assessment.
///
/// Presence of every field is checked by whoever deserializes the request;
/// [`HealthMetrics::validate`] only checks numeric domains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    /// Age in whole years
    pub age: u32,

    #[serde(rename = "gender")]
    pub sex: Sex,

    /// Height in cm
    pub height: f64,

    /// Weight in kg
    pub weight: f64,

    /// Systolic blood pressure in mmHg
    pub systolic: f64,

    /// Diastolic blood pressure in mmHg
    pub diastolic: f64,

    /// Resting heart rate in bpm
    pub heart_rate: f64,

    /// Breaths per minute
    pub respiratory_rate: f64,

    /// SpO2 in percent
    pub oxygen_saturation: f64,

    /// Fasting glucose in mg/dL
    pub glucose_level: f64,

    pub cholesterol: Cholesterol,

    pub activity_level: ActivityLevel,
    pub smoking_status: SmokingStatus,
    pub alcohol_consumption: AlcoholConsumption,

    /// Average nightly sleep
    pub sleep_hours: f64,

    pub stress_level: StressLevel,
    pub diet_type: DietType,

    /// Diagnosed condition tags, e.g. `heartDisease`, `hypertension`, `diabetes`
    #[serde(default)]
    pub medical_conditions: Vec<String>,

    /// Free text; only scanned for keywords
    #[serde(default)]
    pub family_history: String,
}

impl HealthMetrics {
    /// Exact, case-sensitive tag match against the medical conditions.
    #[must_use]
    pub fn has_condition(&self, tag: &str) -> bool {
        self.medical_conditions.iter().any(|c| c == tag)
    }

    /// Validate that every numeric field is inside its domain.
    ///
    /// # Errors
    /// Returns all violations found, one message per field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.age == 0 {
            errors.push("Age must be a positive number of years".to_string());
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            errors.push(format!("Height {} must be a positive number of cm", self.height));
        }
        if !self.weight.is_finite() || self.weight <= 0.0 {
            errors.push(format!("Weight {} must be a positive number of kg", self.weight));
        }

        let non_negative = [
            ("Systolic BP", self.systolic),
            ("Diastolic BP", self.diastolic),
            ("Heart rate", self.heart_rate),
            ("Respiratory rate", self.respiratory_rate),
            ("Glucose level", self.glucose_level),
            ("Total cholesterol", self.cholesterol.total),
            ("HDL cholesterol", self.cholesterol.hdl),
            ("LDL cholesterol", self.cholesterol.ldl),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name} {value} must be a finite, non-negative number"));
            }
        }

        if !(0.0..=100.0).contains(&self.oxygen_saturation) {
            errors.push(format!(
                "Oxygen saturation {} out of range [0, 100]",
                self.oxygen_saturation
            ));
        }
        if !(0.0..=24.0).contains(&self.sleep_hours) {
            errors.push(format!("Sleep hours {} out of range [0, 24]", self.sleep_hours));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
