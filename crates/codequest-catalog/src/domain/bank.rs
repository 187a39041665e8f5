//! Built-in problem bank.
//!
//! The bank ships inside the binary as YAML and answers three questions
//! without touching the network: which topics exist, which problem is the
//! default for a topic, and what a known problem looks like.

use std::collections::{BTreeMap, BTreeSet};

use codequest_core::problem::{ProblemDetail, ProblemSummary};
use serde::Deserialize;
use thiserror::Error;

const BUILTIN_BANK: &str = include_str!("../../data/problem_bank.yaml");

/// Errors raised while loading a problem bank.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("problem bank is not valid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("problem bank has no detail for default problem {0}")]
    MissingDefault(String),

    #[error("topic {topic} names default problem {slug} but does not list it")]
    DefaultNotListed { topic: String, slug: String },
}

/// One practice topic.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TopicEntry {
    /// Display name, also used as the catalog topic identifier.
    pub name: String,
    /// Problem served when nothing better is available.
    pub default_problem: String,
    /// Every problem slug filed under this topic.
    #[serde(default)]
    pub slugs: Vec<String>,
}

/// Completion count for one topic, as shown on the topic list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSummary {
    pub name: String,
    pub completed: usize,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
struct BankDocument {
    default_problem: String,
    topics: Vec<TopicEntry>,
    problems: Vec<ProblemDetail>,
}

/// Problems and topics available offline.
#[derive(Debug, Clone)]
pub struct ProblemBank {
    topics: Vec<TopicEntry>,
    problems: BTreeMap<String, ProblemDetail>,
    fallback: ProblemDetail,
}

impl ProblemBank {
    /// Loads the bank compiled into this crate.
    ///
    /// # Errors
    ///
    /// Returns [`BankError`] if the embedded document is malformed.
    pub fn builtin() -> Result<Self, BankError> {
        Self::from_yaml(BUILTIN_BANK)
    }

    /// Parses and validates a bank document.
    ///
    /// # Errors
    ///
    /// Returns [`BankError`] if the YAML does not parse, or if any default
    /// problem lacks a detail entry or is missing from its topic's slugs.
    pub fn from_yaml(source: &str) -> Result<Self, BankError> {
        let document: BankDocument = serde_yaml::from_str(source)?;
        let problems: BTreeMap<String, ProblemDetail> = document
            .problems
            .into_iter()
            .map(|detail| (detail.id.clone(), detail))
            .collect();

        for topic in &document.topics {
            if !problems.contains_key(&topic.default_problem) {
                return Err(BankError::MissingDefault(topic.default_problem.clone()));
            }
            if !topic.slugs.contains(&topic.default_problem) {
                return Err(BankError::DefaultNotListed {
                    topic: topic.name.clone(),
                    slug: topic.default_problem.clone(),
                });
            }
        }

        let fallback = problems
            .get(&document.default_problem)
            .cloned()
            .ok_or(BankError::MissingDefault(document.default_problem))?;

        Ok(Self {
            topics: document.topics,
            problems,
            fallback,
        })
    }

    /// All topics in display order.
    #[must_use]
    pub fn topics(&self) -> &[TopicEntry] {
        &self.topics
    }

    #[must_use]
    pub fn topic(&self, name: &str) -> Option<&TopicEntry> {
        self.topics.iter().find(|t| t.name == name)
    }

    /// Full detail of a bank problem, if the bank knows it.
    #[must_use]
    pub fn detail(&self, problem_id: &str) -> Option<&ProblemDetail> {
        self.problems.get(problem_id)
    }

    /// The default problem for `topic_id`, or the bank-wide default for a
    /// topic the bank does not know.
    #[must_use]
    pub fn default_for_topic(&self, topic_id: &str) -> &ProblemDetail {
        self.topic(topic_id)
            .and_then(|t| self.problems.get(&t.default_problem))
            .unwrap_or(&self.fallback)
    }

    /// Listing entry for the default problem of `topic_id`.
    #[must_use]
    pub fn default_summary(&self, topic_id: &str) -> ProblemSummary {
        self.default_for_topic(topic_id).summary(topic_id)
    }

    /// `completed / total` for every topic.
    #[must_use]
    pub fn topic_summaries(&self, completed: &BTreeSet<String>) -> Vec<TopicSummary> {
        self.topics
            .iter()
            .map(|topic| TopicSummary {
                name: topic.name.clone(),
                completed: topic.slugs.iter().filter(|s| completed.contains(*s)).count(),
                total: topic.slugs.len(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codequest_core::tier::Difficulty;

    #[test]
    fn test_builtin_bank_lists_seventeen_topics() {
        let bank = ProblemBank::builtin().unwrap();

        assert_eq!(bank.topics().len(), 17);
        assert_eq!(bank.topics()[0].name, "Arrays & Hashing");
        assert_eq!(bank.topics()[16].name, "Math & Geometry");
    }

    #[test]
    fn test_every_topic_default_has_a_detail() {
        let bank = ProblemBank::builtin().unwrap();

        for topic in bank.topics() {
            let detail = bank.default_for_topic(&topic.name);
            assert_eq!(detail.id, topic.default_problem);
            assert!(!detail.examples.is_empty(), "{} has no examples", detail.id);
            assert!(detail.starter_code("python").is_some());
        }
    }

    #[test]
    fn test_two_sum_matches_fallback_display_data() {
        let bank = ProblemBank::builtin().unwrap();

        let detail = bank.detail("two-sum").unwrap();

        assert_eq!(detail.title, "Two Sum");
        assert_eq!(detail.difficulty, Difficulty::Easy);
        assert_eq!(detail.examples.len(), 2);
        assert_eq!(detail.examples[0].input, "nums = [2,7,11,15], target = 9");
        assert_eq!(detail.examples[0].output, "[0,1]");
        assert_eq!(detail.examples[1].input, "nums = [3,2,4], target = 6");
        assert_eq!(detail.examples[1].output, "[1,2]");
    }

    #[test]
    fn test_unknown_topic_falls_back_to_two_sum() {
        let bank = ProblemBank::builtin().unwrap();

        let summary = bank.default_summary("Quantum Sorting");

        assert_eq!(summary.id, "two-sum");
        assert_eq!(summary.topic_id, "Quantum Sorting");
    }

    #[test]
    fn test_topic_defaults_follow_the_catalogue() {
        let bank = ProblemBank::builtin().unwrap();

        assert_eq!(bank.default_for_topic("Stack").id, "valid-parentheses");
        assert_eq!(bank.default_for_topic("Graphs").id, "number-of-islands");
        assert_eq!(bank.default_for_topic("Intervals").id, "merge-intervals");
    }

    #[test]
    fn test_topic_summaries_count_completed_slugs() {
        // Arrange
        let bank = ProblemBank::builtin().unwrap();
        let completed: BTreeSet<String> = ["two-sum", "valid-anagram", "valid-parentheses"]
            .into_iter()
            .map(str::to_owned)
            .collect();

        // Act
        let summaries = bank.topic_summaries(&completed);

        // Assert
        let arrays = summaries.iter().find(|s| s.name == "Arrays & Hashing").unwrap();
        assert_eq!((arrays.completed, arrays.total), (2, 9));
        let stack = summaries.iter().find(|s| s.name == "Stack").unwrap();
        assert_eq!((stack.completed, stack.total), (1, 7));
        let tries = summaries.iter().find(|s| s.name == "Tries").unwrap();
        assert_eq!((tries.completed, tries.total), (0, 3));
    }

    #[test]
    fn test_missing_default_detail_is_rejected() {
        let yaml = "
default_problem: two-sum
topics:
  - name: Stack
    default_problem: valid-parentheses
    slugs: [valid-parentheses]
problems: []
";

        let result = ProblemBank::from_yaml(yaml);

        assert!(matches!(result, Err(BankError::MissingDefault(slug)) if slug == "valid-parentheses"));
    }

    #[test]
    fn test_unlisted_default_is_rejected() {
        let yaml = "
default_problem: two-sum
topics:
  - name: Arrays & Hashing
    default_problem: two-sum
    slugs: [valid-anagram]
problems:
  - id: two-sum
    title: Two Sum
    difficulty: Easy
    statement: Add them up.
";

        let result = ProblemBank::from_yaml(yaml);

        assert!(matches!(result, Err(BankError::DefaultNotListed { .. })));
    }

    #[test]
    fn test_malformed_yaml_is_a_parse_error() {
        let result = ProblemBank::from_yaml("topics: [unclosed");

        assert!(matches!(result, Err(BankError::Parse(_))));
    }
}
