//! Shared JSON-over-HTTP plumbing for the service clients.

use std::time::Duration;

use codequest_core::error::ServiceError;
use reqwest::{RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AppError;

/// One backend service: a base URL and a configured client.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base: Url,
    timeout: Duration,
    bearer: Option<String>,
}

impl HttpBackend {
    /// Creates a backend rooted at `base`. Requests inherit `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if `base` is not an absolute URL, or
    /// [`AppError::Client`] if the HTTP client cannot be built.
    pub fn new(base: &str, timeout: Duration) -> Result<Self, AppError> {
        let parsed = Url::parse(base)
            .map_err(|e| AppError::Config(format!("invalid service URL {base:?}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(AppError::Config(format!("service URL {base:?} cannot be a base")));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base: parsed,
            timeout,
            bearer: None,
        })
    }

    /// Sends `token` as a bearer credential on every request.
    #[must_use]
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// `base` with `segments` appended, each percent-encoded.
    #[must_use]
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GETs `segments` and decodes a JSON body from a success response.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] for timeouts, transport failures,
    /// non-success statuses, and undecodable bodies.
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ServiceError> {
        let response = self.send(self.client.get(self.endpoint(segments))).await?;
        self.decode_success(response).await
    }

    /// POSTs `body` as JSON and decodes a JSON body from a success response.
    ///
    /// # Errors
    ///
    /// Same as [`HttpBackend::get`].
    pub async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.endpoint(segments)).json(body);
        let response = self.send(request).await?;
        self.decode_success(response).await
    }

    /// POSTs `body` as JSON and decodes the response body whatever its
    /// status, for services that describe failures in a typed body.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] for timeouts and transport failures, and
    /// [`ServiceError::Rejected`] if a non-success body does not decode.
    pub async fn post_any_status<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.endpoint(segments)).json(body);
        let response = self.send(request).await?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| self.failure(&e))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            if status.is_success() {
                ServiceError::MalformedResponse(e.to_string())
            } else {
                ServiceError::Rejected {
                    status: status.as_u16(),
                    message: String::from_utf8_lossy(&bytes).into_owned(),
                }
            }
        })
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ServiceError> {
        let request = match &self.bearer {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await.map_err(|e| self.failure(&e))?;
        debug!(url = %response.url(), status = %response.status(), "backend responded");
        Ok(response)
    }

    async fn decode_success<T: DeserializeOwned>(&self, response: Response) -> Result<T, ServiceError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ServiceError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        response.json::<T>().await.map_err(|e| self.failure(&e))
    }

    fn failure(&self, err: &reqwest::Error) -> ServiceError {
        if err.is_timeout() {
            ServiceError::Timeout(self.timeout)
        } else if err.is_decode() {
            ServiceError::MalformedResponse(err.to_string())
        } else {
            ServiceError::Transport(err.to_string())
        }
    }
}
