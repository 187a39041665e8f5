//! Test stores: in-memory and failing `ProgressStore` implementations.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use codequest_core::error::DomainError;
use codequest_core::store::ProgressStore;
use codequest_core::tier::Tier;

/// A progress store held in memory that records every write, so tests can
/// assert both the resulting state and the order mutations were persisted in.
#[derive(Debug, Default)]
pub struct InMemoryProgressStore {
    tiers: Mutex<HashMap<String, Tier>>,
    completed: Mutex<BTreeSet<String>>,
    writes: Mutex<Vec<String>>,
}

impl InMemoryProgressStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with topic tiers and completed problems.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn seeded(tiers: &[(&str, Tier)], completed: &[&str]) -> Self {
        let store = Self::default();
        {
            let mut map = store.tiers.lock().unwrap();
            for (topic, tier) in tiers {
                map.insert((*topic).to_owned(), *tier);
            }
            let mut set = store.completed.lock().unwrap();
            set.extend(completed.iter().map(|id| (*id).to_owned()));
        }
        store
    }

    /// Returns a log of every write, formatted as `tier:<topic>=<tier>` or
    /// `completed:<id>`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    /// Returns a snapshot of the completed set.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn completed(&self) -> BTreeSet<String> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressStore for InMemoryProgressStore {
    async fn load_tier(&self, topic_id: &str) -> Result<Option<Tier>, DomainError> {
        Ok(self.tiers.lock().unwrap().get(topic_id).copied())
    }

    async fn save_tier(&self, topic_id: &str, tier: Tier) -> Result<(), DomainError> {
        self.tiers.lock().unwrap().insert(topic_id.to_owned(), tier);
        self.writes
            .lock()
            .unwrap()
            .push(format!("tier:{topic_id}={tier}"));
        Ok(())
    }

    async fn load_completed(&self) -> Result<BTreeSet<String>, DomainError> {
        Ok(self.completed.lock().unwrap().clone())
    }

    async fn insert_completed(&self, problem_id: &str) -> Result<bool, DomainError> {
        let inserted = self.completed.lock().unwrap().insert(problem_id.to_owned());
        self.writes
            .lock()
            .unwrap()
            .push(format!("completed:{problem_id}"));
        Ok(inserted)
    }
}

/// A progress store that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingProgressStore;

#[async_trait]
impl ProgressStore for FailingProgressStore {
    async fn load_tier(&self, _topic_id: &str) -> Result<Option<Tier>, DomainError> {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }

    async fn save_tier(&self, _topic_id: &str, _tier: Tier) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }

    async fn load_completed(&self) -> Result<BTreeSet<String>, DomainError> {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }

    async fn insert_completed(&self, _problem_id: &str) -> Result<bool, DomainError> {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }
}
