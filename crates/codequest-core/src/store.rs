//! Durable progress store abstraction.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::error::DomainError;
use crate::tier::Tier;

/// Durable key-value store behind the difficulty ledger.
///
/// Holds one tier record per topic and one global set of completed problem
/// identifiers. Every mutating call must be durably applied before it
/// returns.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Load the stored tier for a topic, or `None` if the topic was never
    /// recorded.
    async fn load_tier(&self, topic_id: &str) -> Result<Option<Tier>, DomainError>;

    /// Durably record the tier for a topic.
    async fn save_tier(&self, topic_id: &str, tier: Tier) -> Result<(), DomainError>;

    /// Load the full set of completed problem identifiers.
    async fn load_completed(&self) -> Result<BTreeSet<String>, DomainError>;

    /// Durably add a problem identifier to the completed set.
    /// Returns `true` if the identifier was not already present.
    async fn insert_completed(&self, problem_id: &str) -> Result<bool, DomainError>;
}
