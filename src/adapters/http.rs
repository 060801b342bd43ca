use crate::core::{ReservationRequest, Submitter};
use crate::domain::ports::DEFAULT_TIMEOUT_SECONDS;
use crate::utils::error::{ReservationError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// POSTs reservations as JSON to the clinic's insert endpoint.
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpSubmitter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn submit(&self, request: &ReservationRequest) -> Result<serde_json::Value> {
        tracing::debug!("POST {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Submission response status: {}", status);

        if !status.is_success() {
            return Err(ReservationError::SubmissionFailed {
                status: Some(status.as_u16()),
                message: format!("HTTP {}", status),
            });
        }

        // 回應必須是 JSON，否則視為失敗
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ReservationError::SubmissionFailed {
            status: None,
            message: format!("Invalid JSON response: {}", e),
        })
    }
}
