//! PrintNode cloud channel
//!
//! Submits raw ESC/POS jobs to the PrintNode REST API:
//!
//! ```text
//! POST {base}/printjobs
//! Authorization: Basic base64("<api key>:")
//! { "printerId": 999, "title": "Comanda #1234", "contentType": "raw_base64",
//!   "content": "...", "source": "comanda-print", "qty": 1 }
//! ```
//!
//! A successful response body is the numeric job id.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use super::types::{CloudSubmission, JobMeta};
use crate::core::{Config, ServiceResult};

const JOB_SOURCE: &str = "comanda-print";

/// Cloud print service accepting raw printer jobs
#[async_trait]
pub trait CloudPrintChannel: Send + Sync {
    /// Submit a job; failures are reported in the returned value
    async fn submit_job(
        &self,
        printer_id: i64,
        data: &[u8],
        label: &str,
        meta: &JobMeta,
    ) -> CloudSubmission;
}

#[derive(Debug, Error)]
enum CloudError {
    #[error("PrintNode API key is not configured")]
    MissingApiKey,

    #[error("PrintNode request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Message from the API, passed through as-is
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Invalid PrintNode response: {0}")]
    InvalidResponse(String),
}

impl CloudError {
    fn is_retryable(&self) -> bool {
        match self {
            CloudError::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            CloudError::Rejected { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            CloudError::MissingApiKey | CloudError::InvalidResponse(_) => false,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrintJobRequest<'a> {
    printer_id: i64,
    title: &'a str,
    content_type: &'static str,
    content: String,
    source: &'static str,
    qty: u32,
}

/// PrintNode REST client
#[derive(Debug, Clone)]
pub struct PrintNodeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    backoff: Duration,
}

impl PrintNodeClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> ServiceResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            backoff: Duration::from_millis(250),
        })
    }

    pub fn from_config(config: &Config) -> ServiceResult<Self> {
        Self::new(
            config.printnode_api_url.clone(),
            config.printnode_api_key.clone(),
            config.printnode_timeout(),
        )
    }

    /// Base delay between attempts; attempt `n` waits `n` times this
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn send_once(&self, api_key: &str, job: &PrintJobRequest<'_>) -> Result<i64, CloudError> {
        let response = self
            .http
            .post(format!("{}/printjobs", self.base_url))
            .basic_auth(api_key, None::<&str>)
            .json(job)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CloudError::Rejected {
                status,
                message: error_message(status, &body),
            });
        }

        body.trim()
            .parse::<i64>()
            .map_err(|_| CloudError::InvalidResponse(body.trim().to_string()))
    }

    async fn submit(
        &self,
        printer_id: i64,
        data: &[u8],
        label: &str,
        max_retries: u32,
    ) -> Result<i64, CloudError> {
        let api_key = self.api_key.as_deref().ok_or(CloudError::MissingApiKey)?;

        let job = PrintJobRequest {
            printer_id,
            title: label,
            content_type: "raw_base64",
            content: BASE64.encode(data),
            source: JOB_SOURCE,
            qty: 1,
        };

        let attempts = max_retries.saturating_add(1);
        let mut attempt = 1;
        loop {
            debug!(attempt, "Submitting PrintNode job");
            match self.send_once(api_key, &job).await {
                Ok(job_id) => return Ok(job_id),
                Err(e) if e.is_retryable() && attempt < attempts => {
                    warn!(attempt, error = %e, "PrintNode attempt failed, retrying");
                    tokio::time::sleep(self.backoff.saturating_mul(attempt)).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl CloudPrintChannel for PrintNodeClient {
    #[instrument(
        skip(self, data, meta),
        fields(
            bytes = data.len(),
            store_id = ?meta.store_id,
            order_id = ?meta.order_id,
            order_number = ?meta.order_number,
            printer_name = ?meta.printer_name,
        )
    )]
    async fn submit_job(
        &self,
        printer_id: i64,
        data: &[u8],
        label: &str,
        meta: &JobMeta,
    ) -> CloudSubmission {
        match self.submit(printer_id, data, label, meta.max_retries).await {
            Ok(job_id) => {
                info!(job_id, "PrintNode job accepted");
                CloudSubmission::accepted(job_id)
            }
            Err(e) => {
                warn!(error = %e, "PrintNode job failed");
                CloudSubmission::rejected(e.to_string())
            }
        }
    }
}

/// `message` from a JSON error body, else a status line
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("PrintNode returned HTTP {}", status.as_u16()))
}
