//! Domain layer: the health assessment engine.
//!
//! Pure, deterministic functions from raw metrics to scores, risks,
//! status and trends. Nothing in here performs I/O or reads the clock.

mod assessment;
pub mod history;
pub mod metrics;
pub mod normalize;
pub mod risk;
pub mod scores;
pub mod trend;

pub use assessment::{overall_score, Assessment, HealthStatus};
pub use history::{HistoryWindow, Timeframe};
pub use metrics::{
    ActivityLevel, AlcoholConsumption, Cholesterol, DietType, HealthMetrics, Sex, SmokingStatus,
    StressLevel,
};
pub use normalize::{body_mass_index, normalize, NormalizedMetrics};
pub use risk::{RiskEstimates, RiskLevel};
pub use scores::CategoryScores;
pub use trend::{HealthTrends, TrendDirection, TrendSeries};

/// Errors raised by the assessment engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessmentError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Insufficient history: need at least 2 assessments, have {available}")]
    InsufficientHistory { available: usize },
}
