//! # healthscore
//!
//! Deterministic health assessment engine.
//!
//! Turns one set of health metrics (vitals, labs, lifestyle) into
//! category scores, disease risk estimates, an overall status, and
//! compares assessments over time.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: the pure scoring engine (metrics, scores, risks, trends)
//! - `ports`: trait for the external assessment store
//! - `adapters`: in-memory store and log sanitization
//! - `application`: services tying engine, store and configuration together

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use domain::{Assessment, AssessmentError, HealthMetrics, HealthStatus, HealthTrends};

/// Result type for healthscore operations
pub type Result<T> = std::result::Result<T, HealthScoreError>;

/// Main error type for healthscore
#[derive(Debug, thiserror::Error)]
pub enum HealthScoreError {
    #[error(transparent)]
    Assessment(#[from] AssessmentError),

    #[error("Storage operation failed: {0}")]
    Storage(#[from] adapters::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HealthScoreError {
    /// Whether the caller supplied bad input, as opposed to an internal failure.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Assessment(AssessmentError::InvalidInput(_)))
    }
}
