//! In-memory adapter: Implementation of AssessmentStore.
//!
//! Keeps each user's history in a `Vec` sorted by assessment time. Used
//! by the command-line driver and by tests; real deployments plug their
//! own store in behind the same trait.
//!
//! # Mutex Behavior
//!
//! The map is guarded by a `Mutex`. A poisoned lock is reported as
//! `StorageError::LockPoisoned` rather than panicking.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::domain::{Assessment, HistoryWindow};
use crate::ports::AssessmentStore;

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Store lock poisoned")]
    LockPoisoned,

    #[error("Invalid user id: {0}")]
    InvalidUser(String),
}

type History = HashMap<String, Vec<Assessment>>;

/// Process-local assessment store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    histories: Mutex<History>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-loaded with a user's assessments, in any order.
    ///
    /// # Errors
    /// Returns error if `user_id` is empty.
    pub fn with_history(
        user_id: &str,
        assessments: impl IntoIterator<Item = Assessment>,
    ) -> Result<Self, StorageError> {
        let store = Self::new();
        for assessment in assessments {
            store.append(user_id, &assessment)?;
        }
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, History>, StorageError> {
        self.histories.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

impl AssessmentStore for InMemoryStore {
    type Error = StorageError;

    fn append(&self, user_id: &str, assessment: &Assessment) -> Result<(), Self::Error> {
        if user_id.trim().is_empty() {
            return Err(StorageError::InvalidUser("empty user id".to_string()));
        }

        let mut histories = self.lock()?;
        let history = histories.entry(user_id.to_string()).or_default();

        // Insert after any entry with the same timestamp to keep arrival order.
        let pos = history.partition_point(|a| a.assessed_at <= assessment.assessed_at);
        history.insert(pos, assessment.clone());

        tracing::debug!(
            "Stored assessment at {} ({} total for user)",
            assessment.assessed_at.to_rfc3339(),
            history.len()
        );
        Ok(())
    }

    fn load_history(
        &self,
        user_id: &str,
        window: HistoryWindow,
        now: DateTime<Utc>,
    ) -> Result<Vec<Assessment>, Self::Error> {
        let histories = self.lock()?;
        Ok(histories
            .get(user_id)
            .map(|history| {
                history
                    .iter()
                    .filter(|a| window.contains(a.assessed_at, now))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn load_recent(&self, user_id: &str, limit: usize) -> Result<Vec<Assessment>, Self::Error> {
        let histories = self.lock()?;
        Ok(histories
            .get(user_id)
            .map(|history| history.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    fn count(&self, user_id: &str) -> Result<usize, Self::Error> {
        let histories = self.lock()?;
        Ok(histories.get(user_id).map_or(0, Vec::len))
    }
}
