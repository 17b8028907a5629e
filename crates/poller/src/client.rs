use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode, header};
use serde_json::Value;

use hwbot_common::error::AppError;

/// Source of homework status payloads.
pub trait HomeworkApi {
    /// Fetch every submission updated since `since` (unix seconds), decoded as JSON.
    fn fetch(&self, since: i64) -> impl Future<Output = Result<Value, AppError>> + Send;
}

/// HTTP client for the homework status endpoint.
#[derive(Clone)]
pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
    timeout: Duration,
}

impl PracticumClient {
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
            timeout,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> AppError {
        if e.is_timeout() {
            AppError::Transport(format!("no response within {}s", self.timeout.as_secs()))
        } else {
            AppError::Transport(e.to_string())
        }
    }
}

impl HomeworkApi for PracticumClient {
    /// No retries here; a failed fetch is retried by the poll loop on its next cycle.
    async fn fetch(&self, since: i64) -> Result<Value, AppError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", since)])
            .send()
            .await
            .map_err(|e| {
                let err = self.transport_error(e);
                tracing::error!(endpoint = %self.endpoint, error = %err, "Status API request failed");
                err
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!(
                endpoint = %self.endpoint,
                status = status.as_u16(),
                "Status API returned unexpected HTTP status"
            );
            return Err(AppError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| {
            let err = self.transport_error(e);
            tracing::error!(endpoint = %self.endpoint, error = %err, "Failed to read status API response");
            err
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(error = %e, "Status API response is not valid JSON");
            AppError::Decode(e.to_string())
        })
    }
}
