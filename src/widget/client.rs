use crate::domains::chat::{ChatRequest, ChatResponse};
use crate::error::{PopchatError, Result};

/// HTTP client for the relay's `POST /chat`.
#[derive(Clone)]
pub struct RelayClient {
    endpoint: String,
    http: reqwest::Client,
}

impl RelayClient {
    pub fn new(relay_url: &str) -> Self {
        Self {
            endpoint: format!("{}/chat", relay_url.trim().trim_end_matches('/')),
            http: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the relay's `reply` whatever the status; 429 and 500 bodies carry
    /// user-facing text too. Only transport or decode failures are errors.
    pub async fn submit(&self, message: &str) -> Result<String> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&ChatRequest::text(message))
            .send()
            .await
            .map_err(|e| PopchatError::Http(format!("relay unreachable: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PopchatError::Http(format!("relay read failed: {e}")))?;
        if !status.is_success() {
            tracing::debug!(%status, "relay answered with a handled failure");
        }

        let decoded: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            PopchatError::Serialization(format!("relay response ({status}) not understood: {e}"))
        })?;
        Ok(decoded.reply)
    }
}
