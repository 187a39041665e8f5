//! Submission handling.

use std::fmt;
use std::sync::Arc;

use codequest_core::execution::{ExecutionRequest, ExecutionService, Language, UnsupportedLanguage};
use codequest_core::problem::TestCase;
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::entry_point::derive_entry_point;
use crate::domain::outcome::{ExecutionOutcome, interpret};

/// A submission rejected before reaching the execution service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("invalid submission: {0}")]
    InvalidInput(String),
}

/// Outcome of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    /// Identifies this submission in logs.
    pub correlation_id: Uuid,
    pub outcome: ExecutionOutcome,
    /// Number of test cases submitted.
    pub total: usize,
}

impl SubmissionReport {
    #[must_use]
    pub fn passed(&self) -> usize {
        self.outcome.passed()
    }

    #[must_use]
    pub fn headline(&self) -> String {
        self.outcome.headline(self.total)
    }
}

/// Validates submissions and runs them once against the execution service.
#[derive(Clone)]
pub struct ExecutionCoordinator {
    service: Arc<dyn ExecutionService>,
}

impl fmt::Debug for ExecutionCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionCoordinator").finish_non_exhaustive()
    }
}

impl ExecutionCoordinator {
    #[must_use]
    pub fn new(service: Arc<dyn ExecutionService>) -> Self {
        Self { service }
    }

    /// Runs `code` against `test_cases`.
    ///
    /// Service failures are reported as [`ExecutionOutcome::TransportError`]
    /// and never retried.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::InvalidInput`] without contacting the
    /// service when the code is blank, the language is unsupported, the
    /// problem id yields no entry point, or there are no test cases.
    #[instrument(skip(self, code, test_cases), fields(correlation_id = tracing::field::Empty))]
    pub async fn run(
        &self,
        code: &str,
        language: &str,
        problem_id: &str,
        test_cases: &[TestCase],
    ) -> Result<SubmissionReport, SubmissionError> {
        let request = validate(code, language, problem_id, test_cases)?;
        let correlation_id = Uuid::new_v4();
        tracing::Span::current().record("correlation_id", tracing::field::display(correlation_id));

        let outcome = interpret(self.service.execute(&request).await);
        match &outcome {
            ExecutionOutcome::TransportError(message) => {
                warn!(%message, "execution service unreachable");
            }
            other => info!(
                all_passed = other.is_all_passed(),
                passed = other.passed(),
                total = test_cases.len(),
                "submission evaluated"
            ),
        }

        Ok(SubmissionReport {
            correlation_id,
            outcome,
            total: test_cases.len(),
        })
    }
}

fn validate(
    code: &str,
    language: &str,
    problem_id: &str,
    test_cases: &[TestCase],
) -> Result<ExecutionRequest, SubmissionError> {
    if code.trim().is_empty() {
        return Err(SubmissionError::InvalidInput("code is empty".into()));
    }
    let language: Language = language
        .parse()
        .map_err(|e: UnsupportedLanguage| SubmissionError::InvalidInput(e.to_string()))?;
    let entry_point = derive_entry_point(problem_id).ok_or_else(|| {
        SubmissionError::InvalidInput(format!("no entry point for problem {problem_id:?}"))
    })?;
    if test_cases.is_empty() {
        return Err(SubmissionError::InvalidInput("problem has no test cases".into()));
    }

    Ok(ExecutionRequest {
        code: code.to_owned(),
        language,
        problem_id: problem_id.to_owned(),
        entry_point,
        test_cases: test_cases.to_vec(),
    })
}
