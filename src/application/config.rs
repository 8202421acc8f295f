//! Engine configuration with environment overrides.

use crate::domain::trend::DEFAULT_THRESHOLD_PCT;
use crate::domain::Timeframe;

/// Tunables for the assessment service.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Percent change a metric must exceed to count as a trend
    pub trend_threshold_pct: f64,

    /// Number of assessments returned by the recent-history query
    pub history_limit: usize,

    /// Window used when a trend report names none
    pub default_timeframe: Timeframe,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trend_threshold_pct: DEFAULT_THRESHOLD_PCT,
            history_limit: 10,
            default_timeframe: Timeframe::SixMonths,
        }
    }
}

impl EngineConfig {
    /// Load config overrides from environment (best-effort).
    ///
    /// Supported:
    /// - HEALTHSCORE_TREND_THRESHOLD_PCT
    /// - HEALTHSCORE_HISTORY_LIMIT
    /// - HEALTHSCORE_DEFAULT_TIMEFRAME (1month, 3months, 6months, 1year)
    ///
    /// Unparsable or out-of-range values are ignored with a warning.
    #[must_use]
    pub fn from_env_or_default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(v) = lookup("HEALTHSCORE_TREND_THRESHOLD_PCT") {
            match v.trim().parse::<f64>() {
                Ok(x) if x.is_finite() && x > 0.0 => cfg.trend_threshold_pct = x,
                _ => tracing::warn!("Ignoring HEALTHSCORE_TREND_THRESHOLD_PCT={v:?}"),
            }
        }

        if let Some(v) = lookup("HEALTHSCORE_HISTORY_LIMIT") {
            match v.trim().parse::<usize>() {
                Ok(n) if n > 0 => cfg.history_limit = n,
                _ => tracing::warn!("Ignoring HEALTHSCORE_HISTORY_LIMIT={v:?}"),
            }
        }

        if let Some(v) = lookup("HEALTHSCORE_DEFAULT_TIMEFRAME") {
            match v.parse::<Timeframe>() {
                Ok(tf) => cfg.default_timeframe = tf,
                Err(e) => tracing::warn!("Ignoring HEALTHSCORE_DEFAULT_TIMEFRAME: {e}"),
            }
        }

        cfg
    }
}
