//! Bounded access to the external problem catalog.
//!
//! Every call runs under its own time budget. Failures of any kind (timeout,
//! transport, rejection, garbage body) surface as
//! [`GatewayError::Unavailable`] so callers have a single case to fall back
//! on. No retries happen here; catalog reads are safe to repeat as a fresh
//! user action.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use codequest_core::error::ServiceError;
use codequest_core::problem::{ProblemDetail, ProblemSummary};
use codequest_core::source::ProblemSource;
use thiserror::Error;
use tracing::{instrument, warn};

/// Per-operation time budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayTimeouts {
    pub list_by_topic: Duration,
    pub fetch_detail: Duration,
    pub list_all: Duration,
}

impl Default for GatewayTimeouts {
    fn default() -> Self {
        Self {
            list_by_topic: Duration::from_secs(10),
            fetch_detail: Duration::from_secs(8),
            list_all: Duration::from_secs(10),
        }
    }
}

/// Catalog operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayOperation {
    ListByTopic,
    FetchDetail,
    ListAll,
}

impl fmt::Display for GatewayOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ListByTopic => "list_by_topic",
            Self::FetchDetail => "fetch_detail",
            Self::ListAll => "list_all",
        })
    }
}

/// The catalog could not answer in time or at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("catalog {operation} unavailable: {reason}")]
    Unavailable {
        operation: GatewayOperation,
        reason: ServiceError,
    },
}

impl GatewayError {
    /// Whether repeating the call later could succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Unavailable { reason, .. } => reason.is_transient(),
        }
    }
}

/// Timeout-bounded front for a [`ProblemSource`].
#[derive(Clone)]
pub struct ProblemGateway {
    source: Arc<dyn ProblemSource>,
    timeouts: GatewayTimeouts,
}

impl fmt::Debug for ProblemGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProblemGateway")
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}

impl ProblemGateway {
    /// Creates a gateway with the default budgets.
    #[must_use]
    pub fn new(source: Arc<dyn ProblemSource>) -> Self {
        Self::with_timeouts(source, GatewayTimeouts::default())
    }

    #[must_use]
    pub fn with_timeouts(source: Arc<dyn ProblemSource>, timeouts: GatewayTimeouts) -> Self {
        Self { source, timeouts }
    }

    /// Lists the problems filed under `topic_id`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unavailable`] on timeout or any source failure.
    #[instrument(skip(self))]
    pub async fn list_by_topic(&self, topic_id: &str) -> Result<Vec<ProblemSummary>, GatewayError> {
        bounded(
            GatewayOperation::ListByTopic,
            self.timeouts.list_by_topic,
            self.source.list_by_topic(topic_id),
        )
        .await
    }

    /// Fetches the full detail of one problem.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unavailable`] on timeout or any source failure.
    #[instrument(skip(self))]
    pub async fn fetch_detail(&self, problem_id: &str) -> Result<ProblemDetail, GatewayError> {
        bounded(
            GatewayOperation::FetchDetail,
            self.timeouts.fetch_detail,
            self.source.fetch_detail(problem_id),
        )
        .await
    }

    /// Lists every problem in the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unavailable`] on timeout or any source failure.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<ProblemSummary>, GatewayError> {
        bounded(
            GatewayOperation::ListAll,
            self.timeouts.list_all,
            self.source.list_all(),
        )
        .await
    }
}

async fn bounded<T>(
    operation: GatewayOperation,
    budget: Duration,
    call: impl Future<Output = Result<T, ServiceError>>,
) -> Result<T, GatewayError> {
    let reason = match tokio::time::timeout(budget, call).await {
        Ok(Ok(value)) => return Ok(value),
        Ok(Err(err)) => err,
        Err(_elapsed) => ServiceError::Timeout(budget),
    };
    warn!(%operation, error = %reason, "catalog call failed");
    Err(GatewayError::Unavailable { operation, reason })
}

#[cfg(test)]
mod tests {
    use super::*;
    use codequest_core::tier::Difficulty;
    use codequest_test_support::{StaticProblemSource, sample_detail};

    fn two_sum() -> ProblemSummary {
        ProblemSummary::new("two-sum", "Arrays & Hashing", Difficulty::Easy)
    }

    #[tokio::test]
    async fn test_list_by_topic_passes_listing_through() {
        // Arrange
        let source = StaticProblemSource::new().with_topic("Arrays & Hashing", vec![two_sum()]);
        let gateway = ProblemGateway::new(Arc::new(source));

        // Act
        let listing = gateway.list_by_topic("Arrays & Hashing").await.unwrap();

        // Assert
        assert_eq!(listing, vec![two_sum()]);
    }

    #[tokio::test]
    async fn test_source_failure_is_unavailable() {
        let source = StaticProblemSource::new().failing("list_all");
        let gateway = ProblemGateway::new(Arc::new(source));

        let result = gateway.list_all().await;

        assert_eq!(
            result,
            Err(GatewayError::Unavailable {
                operation: GatewayOperation::ListAll,
                reason: ServiceError::Transport("connection refused".into()),
            })
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_transient_but_not_found_is_not() {
        let source = Arc::new(StaticProblemSource::new().failing("list_all"));
        let gateway = ProblemGateway::new(source);

        let unreachable = gateway.list_all().await.unwrap_err();
        let missing = gateway.fetch_detail("missing").await.unwrap_err();

        assert!(unreachable.is_transient());
        assert!(!missing.is_transient());
    }

    #[tokio::test]
    async fn test_unknown_detail_is_unavailable() {
        let gateway = ProblemGateway::new(Arc::new(StaticProblemSource::new()));

        let result = gateway.fetch_detail("missing").await;

        assert!(matches!(
            result,
            Err(GatewayError::Unavailable {
                operation: GatewayOperation::FetchDetail,
                reason: ServiceError::Rejected { status: 404, .. },
            })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_topic_listing_times_out_after_ten_seconds() {
        let source = StaticProblemSource::new()
            .with_topic("Stack", vec![two_sum()])
            .with_delay(Duration::from_secs(11));
        let gateway = ProblemGateway::new(Arc::new(source));

        let result = gateway.list_by_topic("Stack").await;

        assert_eq!(
            result,
            Err(GatewayError::Unavailable {
                operation: GatewayOperation::ListByTopic,
                reason: ServiceError::Timeout(Duration::from_secs(10)),
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_detail_budget_is_eight_seconds() {
        // Arrange
        let slow = StaticProblemSource::new()
            .with_detail(sample_detail("two-sum", Difficulty::Easy))
            .with_delay(Duration::from_secs(9));
        let just_in_time = StaticProblemSource::new()
            .with_detail(sample_detail("two-sum", Difficulty::Easy))
            .with_delay(Duration::from_secs(7));

        // Act
        let timed_out = ProblemGateway::new(Arc::new(slow)).fetch_detail("two-sum").await;
        let answered = ProblemGateway::new(Arc::new(just_in_time))
            .fetch_detail("two-sum")
            .await;

        // Assert
        assert!(matches!(
            timed_out,
            Err(GatewayError::Unavailable {
                reason: ServiceError::Timeout(budget),
                ..
            }) if budget == Duration::from_secs(8)
        ));
        assert_eq!(answered.unwrap().id, "two-sum");
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_timeouts_are_honoured() {
        let source = StaticProblemSource::new().with_delay(Duration::from_millis(300));
        let timeouts = GatewayTimeouts {
            list_all: Duration::from_millis(100),
            ..GatewayTimeouts::default()
        };
        let gateway = ProblemGateway::with_timeouts(Arc::new(source), timeouts);

        let result = gateway.list_all().await;

        assert!(matches!(
            result,
            Err(GatewayError::Unavailable {
                operation: GatewayOperation::ListAll,
                ..
            })
        ));
    }
}
