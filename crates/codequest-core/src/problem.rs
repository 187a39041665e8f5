//! Problem listings, problem details, and test cases.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tier::Difficulty;

/// Lightweight listing entry returned by a topic query. Used for selection,
/// never displayed directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemSummary {
    /// Problem identifier (catalog slug, e.g. `two-sum`).
    pub id: String,
    /// Topic the problem belongs to.
    pub topic_id: String,
    /// Problem difficulty.
    pub difficulty: Difficulty,
}

impl ProblemSummary {
    /// Creates a new listing entry.
    #[must_use]
    pub fn new(id: impl Into<String>, topic_id: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            id: id.into(),
            topic_id: topic_id.into(),
            difficulty,
        }
    }
}

/// One worked example shown alongside a problem statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemExample {
    /// Example input as displayed, e.g. `nums = [2,7,11,15], target = 9`.
    pub input: String,
    /// Expected output as displayed.
    pub output: String,
    /// Why the output is correct.
    #[serde(default)]
    pub explanation: String,
}

/// Full problem as fetched for display. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetail {
    /// Problem identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Problem difficulty.
    pub difficulty: Difficulty,
    /// Problem statement (may contain markup).
    pub statement: String,
    /// Worked examples.
    #[serde(default)]
    pub examples: Vec<ProblemExample>,
    /// Starter code keyed by language identifier.
    #[serde(default)]
    pub starter_code_by_language: BTreeMap<String, String>,
}

impl ProblemDetail {
    /// Returns the listing entry for this problem under `topic_id`.
    #[must_use]
    pub fn summary(&self, topic_id: &str) -> ProblemSummary {
        ProblemSummary::new(self.id.clone(), topic_id, self.difficulty)
    }

    /// Derives executable test cases from the worked examples.
    #[must_use]
    pub fn test_cases(&self) -> Vec<TestCase> {
        self.examples
            .iter()
            .map(|example| TestCase {
                input: example.input.clone(),
                output: example.output.clone(),
            })
            .collect()
    }

    /// Returns starter code for `language`, if the problem provides it.
    #[must_use]
    pub fn starter_code(&self, language: &str) -> Option<&str> {
        self.starter_code_by_language
            .get(language)
            .map(String::as_str)
    }
}

/// One test case submitted to the execution service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Input passed to the solution.
    pub input: String,
    /// Expected output.
    pub output: String,
}

impl TestCase {
    /// Creates a new test case.
    #[must_use]
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_sum() -> ProblemDetail {
        ProblemDetail {
            id: "two-sum".into(),
            title: "Two Sum".into(),
            difficulty: Difficulty::Easy,
            statement: "Return indices of the two numbers that add up to target.".into(),
            examples: vec![
                ProblemExample {
                    input: "nums = [2,7,11,15], target = 9".into(),
                    output: "[0,1]".into(),
                    explanation: "Because nums[0] + nums[1] == 9.".into(),
                },
                ProblemExample {
                    input: "nums = [3,2,4], target = 6".into(),
                    output: "[1,2]".into(),
                    explanation: String::new(),
                },
            ],
            starter_code_by_language: BTreeMap::from([(
                "python".to_owned(),
                "def twoSum(nums, target):\n    pass\n".to_owned(),
            )]),
        }
    }

    #[test]
    fn test_test_cases_follow_examples_in_order() {
        let cases = two_sum().test_cases();

        assert_eq!(
            cases,
            vec![
                TestCase::new("nums = [2,7,11,15], target = 9", "[0,1]"),
                TestCase::new("nums = [3,2,4], target = 6", "[1,2]"),
            ]
        );
    }

    #[test]
    fn test_starter_code_lookup() {
        let detail = two_sum();
        assert!(detail.starter_code("python").is_some());
        assert!(detail.starter_code("go").is_none());
    }

    #[test]
    fn test_detail_deserializes_from_camel_case_wire_format() {
        let json = serde_json::json!({
            "id": "valid-parentheses",
            "title": "Valid Parentheses",
            "difficulty": "Easy",
            "statement": "Determine if the brackets are balanced.",
            "starterCodeByLanguage": { "python": "def isValid(s):\n    pass\n" }
        });

        let detail: ProblemDetail = serde_json::from_value(json).unwrap();

        assert_eq!(detail.summary("Stack").topic_id, "Stack");
        assert!(detail.examples.is_empty());
        assert_eq!(detail.starter_code_by_language.len(), 1);
    }
}
