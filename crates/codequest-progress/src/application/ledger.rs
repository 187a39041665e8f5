//! The difficulty ledger: the only component that mutates learner progress.
//!
//! All state lives in the injected [`ProgressStore`]; the ledger holds no
//! cache, so every read reflects the last durably completed write.

use std::sync::Arc;

use codequest_core::error::DomainError;
use codequest_core::store::ProgressStore;
use codequest_core::tier::Tier;
use tracing::{debug, info, instrument};

use crate::domain::progress::{CompletedSet, TopicProgress};

/// Narrow interface over the durable progress store.
#[derive(Clone)]
pub struct DifficultyLedger {
    store: Arc<dyn ProgressStore>,
}

impl std::fmt::Debug for DifficultyLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DifficultyLedger").finish_non_exhaustive()
    }
}

impl DifficultyLedger {
    /// Creates a ledger over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn ProgressStore>) -> Self {
        Self { store }
    }

    /// Returns the current tier for a topic, `Easy` if the topic is unseen.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the store cannot be read.
    pub async fn get_tier(&self, topic_id: &str) -> Result<Tier, DomainError> {
        Ok(self.progress(topic_id).await?.tier)
    }

    /// Returns the full progress record for a topic.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the store cannot be read.
    pub async fn progress(&self, topic_id: &str) -> Result<TopicProgress, DomainError> {
        Ok(match self.store.load_tier(topic_id).await? {
            Some(tier) => TopicProgress {
                topic_id: topic_id.to_owned(),
                tier,
            },
            None => TopicProgress::unseen(topic_id),
        })
    }

    /// Moves a topic to its next tier and persists it before returning.
    /// Calling this on an exhausted topic is a no-op that returns
    /// `Exhausted`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the store cannot be read or
    /// written.
    #[instrument(skip(self))]
    pub async fn advance_tier(&self, topic_id: &str) -> Result<Tier, DomainError> {
        let mut progress = self.progress(topic_id).await?;
        if progress.tier.is_exhausted() {
            debug!("topic already exhausted");
            return Ok(Tier::Exhausted);
        }
        let from = progress.tier;
        let to = progress.advance();
        self.store.save_tier(topic_id, to).await?;
        info!(%from, %to, "tier advanced");
        Ok(to)
    }

    /// Records a problem as solved. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` for a blank identifier, or
    /// `DomainError::Infrastructure` if the store cannot be written.
    #[instrument(skip(self))]
    pub async fn mark_completed(&self, problem_id: &str) -> Result<(), DomainError> {
        if problem_id.trim().is_empty() {
            return Err(DomainError::InvalidInput("problem id is blank".into()));
        }
        let inserted = self.store.insert_completed(problem_id).await?;
        if inserted {
            info!("problem completed");
        } else {
            debug!("problem already completed");
        }
        Ok(())
    }

    /// Returns `true` if the problem has been solved.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the store cannot be read.
    pub async fn is_completed(&self, problem_id: &str) -> Result<bool, DomainError> {
        Ok(self.store.load_completed().await?.contains(problem_id))
    }

    /// Returns the full completed set.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the store cannot be read.
    pub async fn completed(&self) -> Result<CompletedSet, DomainError> {
        Ok(self.store.load_completed().await?.into())
    }
}
