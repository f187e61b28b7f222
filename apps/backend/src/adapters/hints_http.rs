//! Hint provider backed by an HTTP text-generation endpoint.
//!
//! Sends the `HintRequest` as JSON and expects `{"hint": "..."}` back.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::AppError;
use crate::services::hints::{HintProvider, HintRequest};

#[derive(Debug, Deserialize)]
struct HintResponse {
    hint: String,
}

#[derive(Debug, Clone)]
pub struct HttpHintProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpHintProvider {
    pub fn new(url: impl Into<String>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("codebreaker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::config(format!("failed to build hint client: {e}")))?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl HintProvider for HttpHintProvider {
    #[instrument(skip_all, fields(url = %self.url, attempts = request.attempts.len()))]
    async fn generate(&self, request: &HintRequest) -> Result<String, AppError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                debug!(error = %e, "hint request failed");
                AppError::hint_unavailable("The hint service could not be reached")
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "hint service returned an error status");
            return Err(AppError::hint_unavailable(format!(
                "The hint service answered with status {}",
                status.as_u16()
            )));
        }

        let body: HintResponse = response.json().await.map_err(|e| {
            debug!(error = %e, "hint response was not understood");
            AppError::hint_unavailable("The hint service sent an unreadable answer")
        })?;
        Ok(body.hint)
    }
}
