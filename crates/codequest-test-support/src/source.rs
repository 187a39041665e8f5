//! Test problem sources: fake catalog services for tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use codequest_core::error::ServiceError;
use codequest_core::problem::{ProblemDetail, ProblemExample, ProblemSummary};
use codequest_core::source::ProblemSource;
use codequest_core::tier::Difficulty;

/// Build a minimal problem detail with one example, for tests that only care
/// about identity and difficulty.
#[must_use]
pub fn sample_detail(id: &str, difficulty: Difficulty) -> ProblemDetail {
    ProblemDetail {
        id: id.to_owned(),
        title: id.replace('-', " "),
        difficulty,
        statement: format!("Solve {id}."),
        examples: vec![ProblemExample {
            input: "nums = [2,7,11,15], target = 9".to_owned(),
            output: "[0,1]".to_owned(),
            explanation: String::new(),
        }],
        starter_code_by_language: BTreeMap::new(),
    }
}

/// A catalog served from memory.
///
/// Topic listings, the global listing, and details are configured up front.
/// Each operation can be switched to fail or to stall for a fixed delay, and
/// every call is recorded by operation name.
#[derive(Debug, Default)]
pub struct StaticProblemSource {
    topics: HashMap<String, Vec<ProblemSummary>>,
    all: Vec<ProblemSummary>,
    details: HashMap<String, ProblemDetail>,
    failing: Vec<&'static str>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

impl StaticProblemSource {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a topic listing.
    #[must_use]
    pub fn with_topic(mut self, topic_id: &str, problems: Vec<ProblemSummary>) -> Self {
        self.topics.insert(topic_id.to_owned(), problems);
        self
    }

    /// Set the global listing.
    #[must_use]
    pub fn with_all(mut self, problems: Vec<ProblemSummary>) -> Self {
        self.all = problems;
        self
    }

    /// Register a problem detail.
    #[must_use]
    pub fn with_detail(mut self, detail: ProblemDetail) -> Self {
        self.details.insert(detail.id.clone(), detail);
        self
    }

    /// Make an operation (`list_by_topic`, `fetch_detail`, or `list_all`)
    /// fail with a transport error.
    #[must_use]
    pub fn failing(mut self, operation: &'static str) -> Self {
        self.failing.push(operation);
        self
    }

    /// Stall every call for `delay` before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Returns the recorded calls, formatted as `<operation>(<argument>)`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn enter(&self, operation: &'static str, argument: &str) -> Result<(), ServiceError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{operation}({argument})"));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(&operation) {
            return Err(ServiceError::Transport("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProblemSource for StaticProblemSource {
    async fn list_by_topic(&self, topic_id: &str) -> Result<Vec<ProblemSummary>, ServiceError> {
        self.enter("list_by_topic", topic_id).await?;
        Ok(self.topics.get(topic_id).cloned().unwrap_or_default())
    }

    async fn fetch_detail(&self, problem_id: &str) -> Result<ProblemDetail, ServiceError> {
        self.enter("fetch_detail", problem_id).await?;
        self.details
            .get(problem_id)
            .cloned()
            .ok_or_else(|| ServiceError::Rejected {
                status: 404,
                message: format!("no such problem: {problem_id}"),
            })
    }

    async fn list_all(&self) -> Result<Vec<ProblemSummary>, ServiceError> {
        self.enter("list_all", "").await?;
        Ok(self.all.clone())
    }
}

/// A catalog that is never reachable.
#[derive(Debug)]
pub struct UnavailableProblemSource;

#[async_trait]
impl ProblemSource for UnavailableProblemSource {
    async fn list_by_topic(&self, _topic_id: &str) -> Result<Vec<ProblemSummary>, ServiceError> {
        Err(ServiceError::Transport("connection refused".into()))
    }

    async fn fetch_detail(&self, _problem_id: &str) -> Result<ProblemDetail, ServiceError> {
        Err(ServiceError::Transport("connection refused".into()))
    }

    async fn list_all(&self) -> Result<Vec<ProblemSummary>, ServiceError> {
        Err(ServiceError::Transport("connection refused".into()))
    }
}
