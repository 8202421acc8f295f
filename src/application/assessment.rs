//! Assessment service: runs the engine and keeps history.
//!
//! This service coordinates:
//! - Input validation and scoring
//! - Appending assessments to the external store
//! - Recent-history and windowed trend reports

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EngineConfig;
use crate::domain::{trend, Assessment, HealthMetrics, HealthTrends, Timeframe, TrendSeries};
use crate::ports::AssessmentStore;
use crate::{HealthScoreError, Result};

/// A user's newest assessments with the trend across them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentHistory {
    /// Newest first
    pub assessments: Vec<Assessment>,

    /// `None` when fewer than two assessments exist
    pub trends: Option<HealthTrends>,
}

/// Trend data for one look-back window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub timeframe: Timeframe,

    /// Chronological per-assessment values
    pub series: TrendSeries,

    /// First-vs-last comparison, `None` when fewer than two assessments exist
    pub summary: Option<HealthTrends>,
}

/// Service for scoring metrics and analysing a user's history.
pub struct AssessmentService<S>
where
    S: AssessmentStore,
{
    store: Arc<S>,
    config: EngineConfig,
}

impl<S> AssessmentService<S>
where
    S: AssessmentStore,
    S::Error: Into<crate::adapters::StorageError>,
{
    /// Create a new assessment service.
    pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Create a service configured from the environment.
    pub fn from_env(store: Arc<S>) -> Self {
        Self::new(store, EngineConfig::from_env_or_default())
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score `metrics` now and append the result to the user's history.
    ///
    /// # Errors
    /// Returns error if the metrics are invalid or the store rejects the write.
    /// Invalid metrics are never stored.
    pub fn assess(&self, user_id: &str, metrics: &HealthMetrics) -> Result<Assessment> {
        self.assess_at(user_id, metrics, Utc::now())
    }

    /// Same as [`Self::assess`] with an explicit assessment time.
    ///
    /// # Errors
    /// Returns error if the metrics are invalid or the store rejects the write.
    pub fn assess_at(
        &self,
        user_id: &str,
        metrics: &HealthMetrics,
        assessed_at: DateTime<Utc>,
    ) -> Result<Assessment> {
        tracing::debug!("Scoring metrics for user {user_id}");

        let assessment = match Assessment::evaluate(metrics, assessed_at) {
            Ok(a) => a.for_user(user_id),
            Err(e) => {
                tracing::warn!("Rejected metrics for user {user_id}: {e}");
                return Err(e.into());
            }
        };

        self.store
            .append(user_id, &assessment)
            .map_err(|e| HealthScoreError::Storage(e.into()))?;

        tracing::info!(
            "Assessment complete: status={}, overall={:.2}, bmi={:.2}",
            assessment.health_status,
            assessment.overall_score,
            assessment.bmi()
        );

        Ok(assessment)
    }

    /// Newest assessments (up to the configured limit) and their trend.
    ///
    /// # Errors
    /// Returns error if the store cannot be read.
    pub fn recent(&self, user_id: &str) -> Result<RecentHistory> {
        let assessments = self
            .store
            .load_recent(user_id, self.config.history_limit)
            .map_err(|e| HealthScoreError::Storage(e.into()))?;

        // Stored newest first; trends compare oldest to newest.
        let chronological: Vec<Assessment> = assessments.iter().rev().cloned().collect();
        let trends = self.summarize(&chronological);

        Ok(RecentHistory {
            assessments,
            trends,
        })
    }

    /// Trend report for `timeframe` (or the configured default) ending now.
    ///
    /// # Errors
    /// Returns error if the store cannot be read.
    pub fn trend_report(
        &self,
        user_id: &str,
        timeframe: Option<Timeframe>,
    ) -> Result<TrendReport> {
        self.trend_report_at(user_id, timeframe, Utc::now())
    }

    /// Same as [`Self::trend_report`] with an explicit end of window.
    ///
    /// # Errors
    /// Returns error if the store cannot be read.
    pub fn trend_report_at(
        &self,
        user_id: &str,
        timeframe: Option<Timeframe>,
        now: DateTime<Utc>,
    ) -> Result<TrendReport> {
        let timeframe = timeframe.unwrap_or(self.config.default_timeframe);
        let history = self
            .store
            .load_history(user_id, timeframe.into(), now)
            .map_err(|e| HealthScoreError::Storage(e.into()))?;

        tracing::debug!(
            "Building {timeframe} trend report over {} assessments",
            history.len()
        );

        Ok(TrendReport {
            timeframe,
            series: TrendSeries::from_history(&history),
            summary: self.summarize(&history),
        })
    }

    /// Get the number of stored assessments for a user.
    ///
    /// # Errors
    /// Returns error if the store cannot be read.
    pub fn assessment_count(&self, user_id: &str) -> Result<usize> {
        self.store
            .count(user_id)
            .map_err(|e| HealthScoreError::Storage(e.into()))
    }

    fn summarize(&self, chronological: &[Assessment]) -> Option<HealthTrends> {
        match trend::analyze(chronological, self.config.trend_threshold_pct) {
            Ok(trends) => Some(trends),
            Err(e) => {
                tracing::debug!("No trend summary: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryStore;
    use crate::domain::metrics::fixtures::*;
    use crate::domain::{HealthStatus, TrendDirection};
    use chrono::{Duration, TimeZone};

    fn create_test_service() -> AssessmentService<InMemoryStore> {
        AssessmentService::new(Arc::new(InMemoryStore::new()), EngineConfig::default())
    }

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
            .single()
            .expect("Should build timestamp")
            + Duration::days(n)
    }

    fn with_weight(weight: f64) -> HealthMetrics {
        HealthMetrics {
            weight,
            ..healthy_female()
        }
    }

    #[test]
    fn test_assess_stores_result() {
        let service = create_test_service();
        let assessment = service
            .assess("alice", &hypertensive_male())
            .expect("Should assess");

        assert_eq!(assessment.health_status, HealthStatus::Fair);
        assert_eq!(assessment.user_id.as_deref(), Some("alice"));
        assert_eq!(service.assessment_count("alice").expect("Should count"), 1);
    }

    #[test]
    fn test_service_exposes_config() {
        let config = EngineConfig {
            history_limit: 4,
            ..EngineConfig::default()
        };
        let service = AssessmentService::new(Arc::new(InMemoryStore::new()), config.clone());
        assert_eq!(service.config(), &config);
    }

    #[test]
    fn test_invalid_metrics_are_not_stored() {
        let service = create_test_service();
        let metrics = HealthMetrics {
            height: 0.0,
            ..healthy_female()
        };

        let err = service.assess("alice", &metrics).expect_err("Should reject");
        assert!(err.is_invalid_input());
        assert_eq!(service.assessment_count("alice").expect("Should count"), 0);
    }

    #[test]
    fn test_store_errors_propagate() {
        let service = create_test_service();
        let err = service
            .assess("", &healthy_female())
            .expect_err("Should fail");
        assert!(matches!(err, HealthScoreError::Storage(_)));
    }

    #[test]
    fn test_recent_without_history_has_no_trend() {
        let service = create_test_service();
        service
            .assess_at("alice", &healthy_female(), day(0))
            .expect("Should assess");

        let recent = service.recent("alice").expect("Should load");
        assert_eq!(recent.assessments.len(), 1);
        assert!(recent.trends.is_none());
    }

    #[test]
    fn test_recent_trend_runs_oldest_to_newest() {
        let service = create_test_service();
        // BMI climbs from ~22 to ~29 over the period.
        for (i, weight) in [60.0, 66.0, 72.0, 79.0].into_iter().enumerate() {
            service
                .assess_at("alice", &with_weight(weight), day(i as i64 * 30))
                .expect("Should assess");
        }

        let recent = service.recent("alice").expect("Should load");
        assert_eq!(recent.assessments[0].assessed_at, day(90));
        let trends = recent.trends.expect("Should have trends");
        assert_eq!(trends.bmi, TrendDirection::Increasing);
        assert_eq!(trends.systolic, TrendDirection::Stable);
    }

    #[test]
    fn test_recent_respects_history_limit() {
        let config = EngineConfig {
            history_limit: 3,
            ..EngineConfig::default()
        };
        let service = AssessmentService::new(Arc::new(InMemoryStore::new()), config);
        for n in 0..6 {
            service
                .assess_at("alice", &healthy_female(), day(n))
                .expect("Should assess");
        }

        let recent = service.recent("alice").expect("Should load");
        assert_eq!(recent.assessments.len(), 3);
        assert_eq!(recent.assessments[2].assessed_at, day(3));
    }

    #[test]
    fn test_trend_report_window() {
        let service = create_test_service();
        service
            .assess_at("alice", &with_weight(60.0), day(0))
            .expect("Should assess");
        service
            .assess_at("alice", &with_weight(70.0), day(200))
            .expect("Should assess");
        service
            .assess_at("alice", &with_weight(71.0), day(230))
            .expect("Should assess");

        let now = day(240);
        let month = service
            .trend_report_at("alice", Some(Timeframe::OneMonth), now)
            .expect("Should report");
        assert_eq!(month.series.len(), 1);
        assert!(month.summary.is_none());

        let default = service
            .trend_report_at("alice", None, now)
            .expect("Should report");
        assert_eq!(default.timeframe, Timeframe::SixMonths);
        assert_eq!(default.series.len(), 2);
        assert_eq!(
            default.summary.expect("Should have summary").bmi,
            TrendDirection::Stable
        );

        let year = service
            .trend_report_at("alice", Some(Timeframe::OneYear), now)
            .expect("Should report");
        assert_eq!(year.series.len(), 3);
        assert_eq!(
            year.summary.expect("Should have summary").bmi,
            TrendDirection::Increasing
        );
    }

    #[test]
    fn test_threshold_comes_from_config() {
        let config = EngineConfig {
            trend_threshold_pct: 50.0,
            ..EngineConfig::default()
        };
        let service = AssessmentService::new(Arc::new(InMemoryStore::new()), config);
        service
            .assess_at("alice", &with_weight(60.0), day(0))
            .expect("Should assess");
        service
            .assess_at("alice", &with_weight(75.0), day(1))
            .expect("Should assess");

        let trends = service
            .recent("alice")
            .expect("Should load")
            .trends
            .expect("Should have trends");
        assert_eq!(trends.bmi, TrendDirection::Stable);
    }
}
