//! Interpretation of execution reports.

use codequest_core::error::ServiceError;
use codequest_core::execution::{CaseResult, ExecutionReport};

/// What happened to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Every test case passed.
    AllPassed(Vec<CaseResult>),
    /// The code ran and at least one case produced a wrong answer.
    SomeFailed(Vec<CaseResult>),
    /// The code failed to compile or crashed on every failing case.
    RuntimeError(String),
    /// The execution service could not be reached.
    TransportError(String),
}

impl ExecutionOutcome {
    #[must_use]
    pub fn is_all_passed(&self) -> bool {
        matches!(self, Self::AllPassed(_))
    }

    /// Per-case results, empty when the code never ran.
    #[must_use]
    pub fn results(&self) -> &[CaseResult] {
        match self {
            Self::AllPassed(results) | Self::SomeFailed(results) => results,
            Self::RuntimeError(_) | Self::TransportError(_) => &[],
        }
    }

    /// Number of cases that passed.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.results().iter().filter(|r| r.passed).count()
    }

    /// One-line summary for the learner.
    #[must_use]
    pub fn headline(&self, total: usize) -> String {
        match self {
            Self::AllPassed(_) => format!("All {total} test cases passed!"),
            Self::SomeFailed(_) => format!("{}/{total} test cases passed.", self.passed()),
            Self::RuntimeError(message) => format!("Your code raised an error: {message}"),
            Self::TransportError(message) => {
                format!("Could not reach the code runner ({message}). Please retry.")
            }
        }
    }
}

fn crashed(result: &CaseResult) -> bool {
    !result.passed && result.error.is_some() && result.actual_output.is_none()
}

/// Maps the service's answer to an outcome.
///
/// A completed run where every failing case carries an error and no output
/// is reported as a runtime error: the code never produced an answer.
#[must_use]
pub fn interpret(report: Result<ExecutionReport, ServiceError>) -> ExecutionOutcome {
    match report {
        Ok(ExecutionReport::Completed {
            all_passed: true,
            results,
            ..
        }) => ExecutionOutcome::AllPassed(results),
        Ok(ExecutionReport::Completed {
            results,
            code_output,
            ..
        }) => {
            let failing: Vec<&CaseResult> = results.iter().filter(|r| !r.passed).collect();
            if failing.is_empty() {
                let message = if code_output.trim().is_empty() {
                    "no test results were reported".to_owned()
                } else {
                    code_output
                };
                ExecutionOutcome::RuntimeError(message)
            } else if failing.iter().all(|r| crashed(r)) {
                let message = failing
                    .iter()
                    .find_map(|r| r.error.clone())
                    .unwrap_or_default();
                ExecutionOutcome::RuntimeError(message)
            } else {
                ExecutionOutcome::SomeFailed(results)
            }
        }
        Ok(ExecutionReport::Failed { error, message }) => {
            ExecutionOutcome::RuntimeError(if message.is_empty() { error } else { message })
        }
        Err(err) => ExecutionOutcome::TransportError(err.to_string()),
    }
}
