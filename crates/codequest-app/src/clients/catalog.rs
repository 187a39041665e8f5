//! Problem catalog client.
//!
//! Every catalog response is wrapped as `{"status": "success", "data": ...}`
//! or `{"status": "error", "message": ...}`.

use async_trait::async_trait;
use codequest_core::error::ServiceError;
use codequest_core::problem::{ProblemDetail, ProblemSummary};
use codequest_core::source::ProblemSource;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::clients::http::HttpBackend;

#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Envelope<T> {
    Success { data: T },
    Error { message: String },
}

impl<T> Envelope<T> {
    fn into_result(self) -> Result<T, ServiceError> {
        match self {
            Self::Success { data } => Ok(data),
            Self::Error { message } => Err(ServiceError::Rejected {
                status: 200,
                message,
            }),
        }
    }
}

/// [`ProblemSource`] backed by the catalog service.
#[derive(Debug, Clone)]
pub struct HttpProblemSource {
    backend: HttpBackend,
}

impl HttpProblemSource {
    #[must_use]
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }

    async fn fetch<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ServiceError> {
        self.backend.get::<Envelope<T>>(segments).await?.into_result()
    }
}

#[async_trait]
impl ProblemSource for HttpProblemSource {
    async fn list_by_topic(&self, topic_id: &str) -> Result<Vec<ProblemSummary>, ServiceError> {
        self.fetch(&["api", "topics", topic_id, "problems"]).await
    }

    async fn fetch_detail(&self, problem_id: &str) -> Result<ProblemDetail, ServiceError> {
        self.fetch(&["api", "leetcode", problem_id]).await
    }

    async fn list_all(&self) -> Result<Vec<ProblemSummary>, ServiceError> {
        self.fetch(&["api", "leetcode", "problems"]).await
    }
}
