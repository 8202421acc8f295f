//! Application layer: Use cases and services.
//!
//! This module orchestrates the domain engine with the store port to
//! implement the assessment and trend-report use cases.

mod assessment;
mod config;

pub use assessment::{AssessmentService, RecentHistory, TrendReport};
pub use config::EngineConfig;
