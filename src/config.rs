use serde::{Deserialize, Serialize};

use crate::error::{PopchatError, Result};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_RELAY_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

impl OpenAiConfig {
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    pub system_prompt: String,
    /// Upper bound on one upstream call. `None` leaves reqwest's default (no timeout).
    pub request_timeout_secs: Option<u64>,
    pub openai: OpenAiConfig,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            request_timeout_secs: None,
            openai: OpenAiConfig {
                api_key: None,
                model: None,
                base_url: None,
            },
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        config.openai.api_key = get("OPENROUTER_API_KEY");
        config.openai.model = get("POPCHAT_MODEL");
        config.openai.base_url = get("POPCHAT_BASE_URL");
        if let Some(host) = get("POPCHAT_HOST") {
            config.host = host;
        }
        if let Some(port) = get("POPCHAT_PORT") {
            config.port = port.trim().parse().map_err(|_| {
                PopchatError::Config(format!("POPCHAT_PORT is not a valid port: {port}"))
            })?;
        }
        if let Some(secs) = get("POPCHAT_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                PopchatError::Config(format!("POPCHAT_TIMEOUT_SECS is not a number: {secs}"))
            })?;
            config.request_timeout_secs = (secs > 0).then_some(secs);
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
