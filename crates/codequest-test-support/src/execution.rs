//! Test execution services.

use std::sync::Mutex;

use async_trait::async_trait;
use codequest_core::error::ServiceError;
use codequest_core::execution::{ExecutionReport, ExecutionRequest, ExecutionService};

/// An execution service that answers every submission with the same report
/// and records the requests it received.
#[derive(Debug)]
pub struct ScriptedExecutionService {
    report: ExecutionReport,
    requests: Mutex<Vec<ExecutionRequest>>,
}

impl ScriptedExecutionService {
    /// Create a service that always returns `report`.
    #[must_use]
    pub fn new(report: ExecutionReport) -> Self {
        Self {
            report,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A service reporting that every test case passed.
    #[must_use]
    pub fn all_passed() -> Self {
        Self::new(ExecutionReport::Completed {
            all_passed: true,
            results: Vec::new(),
            code_output: String::new(),
        })
    }

    /// Returns the recorded requests.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<ExecutionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExecutionService for ScriptedExecutionService {
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionReport, ServiceError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.report.clone())
    }
}

/// An execution service that is never reachable and counts attempts.
#[derive(Debug, Default)]
pub struct FailingExecutionService {
    attempts: Mutex<usize>,
}

impl FailingExecutionService {
    /// Number of submissions attempted.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl ExecutionService for FailingExecutionService {
    async fn execute(&self, _request: &ExecutionRequest) -> Result<ExecutionReport, ServiceError> {
        *self.attempts.lock().unwrap() += 1;
        Err(ServiceError::Transport("connection refused".into()))
    }
}
