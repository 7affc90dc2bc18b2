use async_trait::async_trait;

use crate::error::Result;

/// A hosted chat-completion backend.
///
/// Implementations send exactly one system turn followed by one user turn and
/// return the text of the first completion. Quota exhaustion must surface as
/// [`crate::error::PopchatError::QuotaExceeded`] so the relay can tell it apart.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, system_prompt: &str, prompt: &str) -> Result<String>;
}
