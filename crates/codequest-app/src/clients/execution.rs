//! Code execution client.

use async_trait::async_trait;
use codequest_core::error::ServiceError;
use codequest_core::execution::{ExecutionReport, ExecutionRequest, ExecutionService};

use crate::clients::http::HttpBackend;

/// [`ExecutionService`] backed by the judge service's `submit` endpoint.
///
/// The judge answers refusals with an `{error, message}` body and a
/// non-success status; those decode into [`ExecutionReport::Failed`].
#[derive(Debug, Clone)]
pub struct HttpExecutionService {
    backend: HttpBackend,
}

impl HttpExecutionService {
    #[must_use]
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl ExecutionService for HttpExecutionService {
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionReport, ServiceError> {
        self.backend.post_any_status(&["submit"], request).await
    }
}
