//! Network layer for report submissions.

use async_trait::async_trait;
use noise_nab_server_models::{ApiError, ApiMessage, ApiNoiseReportSubmission};

/// Errors from sending a report.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Server responded {status}: {}", .error.as_deref().unwrap_or("no error body"))]
    Status {
        /// HTTP status code.
        status: u16,
        /// `error` field of the response body, if one was returned.
        error: Option<String>,
    },
}

/// Delivers one report submission to the ingestion endpoint.
#[async_trait]
pub trait ReportTransport: Send + Sync {
    /// Sends `submission` exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the request fails or the server does
    /// not acknowledge the report.
    async fn send(&self, submission: &ApiNoiseReportSubmission)
    -> Result<ApiMessage, TransportError>;
}

/// [`ReportTransport`] that posts JSON to a noise nab server.
#[derive(Debug, Clone)]
pub struct HttpReportTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpReportTransport {
    /// Creates a transport for the server at `base_url`
    /// (e.g. `http://localhost:5000`).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Full URL of the report endpoint.
    #[must_use]
    pub fn report_url(&self) -> String {
        format!("{}/api/noise/report", self.base_url)
    }
}

#[async_trait]
impl ReportTransport for HttpReportTransport {
    async fn send(
        &self,
        submission: &ApiNoiseReportSubmission,
    ) -> Result<ApiMessage, TransportError> {
        let response = self
            .client
            .post(self.report_url())
            .json(submission)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error = response.json::<ApiError>().await.ok().map(|body| body.error);
            return Err(TransportError::Status {
                status: status.as_u16(),
                error,
            });
        }

        Ok(response.json::<ApiMessage>().await?)
    }
}
