use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of `POST /chat`. `message` is not validated: any JSON value, or none, is accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
}

impl ChatRequest {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: Some(Value::String(message.into())),
        }
    }

    /// The user turn sent upstream. Strings pass through verbatim, other JSON
    /// values as their compact rendering, and a missing or null field as empty.
    pub fn prompt(&self) -> String {
        match &self.message {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

/// Body returned by `POST /chat` on success and on handled failures alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn roles_serialize_lowercase() {
        let value = serde_json::to_value(Message::assistant("hi")).unwrap();
        assert_eq!(value, json!({"role": "assistant", "content": "hi"}));
    }

    #[test]
    fn chat_request_tolerates_missing_and_null_message() {
        let missing: ChatRequest = serde_json::from_value(json!({})).unwrap();
        assert!(missing.message.is_none());
        assert_eq!(missing.prompt(), "");
        let null: ChatRequest = serde_json::from_value(json!({"message": null})).unwrap();
        assert!(null.message.is_none());
        assert_eq!(null.prompt(), "");
        let present: ChatRequest = serde_json::from_value(json!({"message": "hey"})).unwrap();
        assert_eq!(present.prompt(), "hey");
    }

    #[test]
    fn non_string_messages_render_as_json() {
        let number: ChatRequest = serde_json::from_value(json!({"message": 42})).unwrap();
        assert_eq!(number.prompt(), "42");
        let list: ChatRequest = serde_json::from_value(json!({"message": ["a", 1]})).unwrap();
        assert_eq!(list.prompt(), "[\"a\",1]");
    }

    #[test]
    fn text_request_serializes_as_plain_string() {
        let value = serde_json::to_value(ChatRequest::text("hi")).unwrap();
        assert_eq!(value, json!({"message": "hi"}));
    }
}
