//! Derived metrics computed from raw input before scoring.

use serde::{Deserialize, Serialize};

use super::{AssessmentError, HealthMetrics};

/// Raw metrics plus the values derived from them.
///
/// Serializes flat: the raw fields and `bmi` sit side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMetrics {
    #[serde(flatten)]
    pub raw: HealthMetrics,

    /// Body-mass index in kg/m²
    pub bmi: f64,
}

/// Body-mass index: weight / (height in m)².
///
/// # Errors
/// Returns `InvalidInput` if height is not positive or either value is not finite.
pub fn body_mass_index(height_cm: f64, weight_kg: f64) -> Result<f64, AssessmentError> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(AssessmentError::InvalidInput(format!(
            "Height {height_cm} must be a positive number of cm"
        )));
    }
    if !weight_kg.is_finite() {
        return Err(AssessmentError::InvalidInput(format!(
            "Weight {weight_kg} must be a finite number of kg"
        )));
    }

    let height_m = height_cm / 100.0;
    Ok(weight_kg / (height_m * height_m))
}

/// Validate raw metrics and attach derived values.
///
/// # Errors
/// Returns `InvalidInput` listing every out-of-domain field.
pub fn normalize(metrics: &HealthMetrics) -> Result<NormalizedMetrics, AssessmentError> {
    metrics
        .validate()
        .map_err(|errors| AssessmentError::InvalidInput(errors.join("; ")))?;

    let bmi = body_mass_index(metrics.height, metrics.weight)?;
    Ok(NormalizedMetrics {
        raw: metrics.clone(),
        bmi,
    })
}
