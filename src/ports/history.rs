//! History port: Trait for the external assessment store.
//!
//! The engine never persists anything itself. A host supplies an
//! implementation that appends assessments per user and hands back
//! ordered, window-filtered history for trend analysis.

use chrono::{DateTime, Utc};

use crate::domain::{Assessment, HistoryWindow};

/// Trait for per-user assessment history.
pub trait AssessmentStore: Send + Sync {
    /// Error type for store operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Append an assessment to a user's history.
    ///
    /// # Errors
    /// Returns error if the store rejects the write.
    fn append(&self, user_id: &str, assessment: &Assessment) -> Result<(), Self::Error>;

    /// Load a user's assessments inside `window`, oldest first.
    ///
    /// # Errors
    /// Returns error if the store cannot be read.
    fn load_history(
        &self,
        user_id: &str,
        window: HistoryWindow,
        now: DateTime<Utc>,
    ) -> Result<Vec<Assessment>, Self::Error>;

    /// Load up to `limit` of a user's newest assessments, newest first.
    ///
    /// # Errors
    /// Returns error if the store cannot be read.
    fn load_recent(&self, user_id: &str, limit: usize) -> Result<Vec<Assessment>, Self::Error>;

    /// Number of assessments stored for a user.
    ///
    /// # Errors
    /// Returns error if the store cannot be read.
    fn count(&self, user_id: &str) -> Result<usize, Self::Error>;
}
