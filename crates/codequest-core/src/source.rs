//! Problem catalog service abstraction.

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::problem::{ProblemDetail, ProblemSummary};

/// External problem catalog. All calls are pure reads and safe to retry.
#[async_trait]
pub trait ProblemSource: Send + Sync {
    /// List the problems filed under a topic, in stable catalog order.
    async fn list_by_topic(&self, topic_id: &str) -> Result<Vec<ProblemSummary>, ServiceError>;

    /// Fetch the full detail of one problem.
    async fn fetch_detail(&self, problem_id: &str) -> Result<ProblemDetail, ServiceError>;

    /// List every problem in the catalog, in stable catalog order.
    async fn list_all(&self) -> Result<Vec<ProblemSummary>, ServiceError>;
}
