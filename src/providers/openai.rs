use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContent,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
};

use crate::config::{OpenAiConfig, RelayConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::error::{PopchatError, Result};
use crate::interfaces::providers::CompletionProvider;

/// Chat-completion client for OpenAI-compatible gateways (OpenRouter by default).
///
/// Requests are built with the `async-openai` types but sent over a plain
/// `reqwest` client so the upstream status code stays visible; a 429 has to be
/// reported differently from every other failure.
#[derive(Clone)]
pub struct OpenAiProvider {
    model: String,
    api_key: Option<String>,
    base_url: String,
    http: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(api_key: Option<String>, model: Option<String>, base_url: Option<String>) -> Self {
        Self {
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let OpenAiConfig {
            api_key,
            model,
            base_url,
        } = config.openai.clone();
        let mut provider = Self::new(api_key, model, base_url);

        if let Some(secs) = config.request_timeout_secs {
            provider.http = reqwest::Client::builder()
                .timeout(Duration::from_secs(secs))
                .build()
                .map_err(|e| PopchatError::Config(format!("http client: {e}")))?;
        }
        Ok(provider)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request(&self, system_prompt: &str, prompt: &str) -> Result<CreateChatCompletionRequest> {
        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_prompt)
            .build()
            .map_err(|e| PopchatError::Runtime(e.to_string()))?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Text(
                prompt.to_string(),
            ))
            .build()
            .map_err(|e| PopchatError::Runtime(e.to_string()))?;

        CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(vec![
                ChatCompletionRequestMessage::System(system),
                ChatCompletionRequestMessage::User(user),
            ])
            .build()
            .map_err(|e| PopchatError::Runtime(e.to_string()))
    }

    async fn raw_chat_completion(&self, request: &CreateChatCompletionRequest) -> Result<Value> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let mut builder = self.http.post(url).json(request);
        if let Some(key) = self.api_key.as_deref() {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            PopchatError::Http(format!("Chat completion transport failed: {e}"))
        })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PopchatError::Http(format!("Chat completion read failed: {e}")))?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(PopchatError::QuotaExceeded(body));
        }
        if !status.is_success() {
            return Err(PopchatError::Upstream(format!(
                "Chat completion failed ({status}): {body}"
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            PopchatError::Serialization(format!("Chat completion decode failed: {e}"))
        })
    }

    /// OpenRouter can answer 200 with `{"error": {...}}` instead of choices.
    fn error_from_envelope(response: &Value) -> Option<PopchatError> {
        let error = response.get("error")?;
        let message = error
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown provider error")
            .to_string();
        let quota = match error.get("code") {
            Some(Value::Number(code)) => code.as_u64() == Some(429),
            Some(Value::String(code)) => {
                code == "429" || code == "rate_limit_exceeded" || code == "insufficient_quota"
            }
            _ => false,
        };
        if quota {
            Some(PopchatError::QuotaExceeded(message))
        } else {
            Some(PopchatError::Upstream(message))
        }
    }

    fn extract_text_from_value(response: &Value) -> Result<String> {
        if let Some(err) = Self::error_from_envelope(response) {
            return Err(err);
        }
        let message = response
            .get("choices")
            .and_then(|v| v.get(0))
            .and_then(|choice| choice.get("message"))
            .ok_or_else(|| PopchatError::Upstream("No choices returned".to_string()))?;
        message
            .get("content")
            .and_then(|content| content.as_str())
            .map(|text| text.to_string())
            .ok_or_else(|| PopchatError::Upstream("Completion has no text content".to_string()))
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, system_prompt: &str, prompt: &str) -> Result<String> {
        let request = self.build_request(system_prompt, prompt)?;
        debug!(model = %self.model, "sending chat completion");
        let response = self.raw_chat_completion(&request).await?;
        Self::extract_text_from_value(&response)
    }
}
