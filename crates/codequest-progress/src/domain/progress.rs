//! Per-topic progress and the completed-problem set.

use std::collections::BTreeSet;

use codequest_core::tier::Tier;
use serde::{Deserialize, Serialize};

/// Progress of one learner through one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicProgress {
    /// Topic name, e.g. `Arrays & Hashing`.
    pub topic_id: String,
    /// Tier currently being worked through.
    pub tier: Tier,
}

impl TopicProgress {
    /// Progress for a topic that has never been visited.
    #[must_use]
    pub fn unseen(topic_id: impl Into<String>) -> Self {
        Self {
            topic_id: topic_id.into(),
            tier: Tier::default(),
        }
    }

    /// Moves to the next tier and returns it. `Exhausted` stays `Exhausted`.
    pub fn advance(&mut self) -> Tier {
        self.tier = self.tier.next();
        self.tier
    }
}

/// Global set of solved problem identifiers. Grows monotonically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletedSet(BTreeSet<String>);

impl CompletedSet {
    /// Returns `true` if `problem_id` has been solved.
    #[must_use]
    pub fn contains(&self, problem_id: &str) -> bool {
        self.0.contains(problem_id)
    }

    /// Number of solved problems.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing has been solved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates solved identifiers in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Borrow the underlying set.
    #[must_use]
    pub fn as_set(&self) -> &BTreeSet<String> {
        &self.0
    }
}

impl From<BTreeSet<String>> for CompletedSet {
    fn from(set: BTreeSet<String>) -> Self {
        Self(set)
    }
}

impl FromIterator<String> for CompletedSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
