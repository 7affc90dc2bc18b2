use thiserror::Error;

#[derive(Debug, Error)]
pub enum PopchatError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("runtime error: {0}")]
    Runtime(String),
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl PopchatError {
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, PopchatError::QuotaExceeded(_))
    }
}

pub use crate::Result;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_category_prefix() {
        let err = PopchatError::Config("x".to_string());
        assert!(format!("{err}").contains("configuration error"));
        let err = PopchatError::QuotaExceeded("slow down".to_string());
        assert_eq!(format!("{err}"), "quota exceeded: slow down");
    }

    #[test]
    fn only_quota_variant_reports_quota() {
        assert!(PopchatError::QuotaExceeded(String::new()).is_quota_exceeded());
        assert!(!PopchatError::Upstream(String::new()).is_quota_exceeded());
        assert!(!PopchatError::Http(String::new()).is_quota_exceeded());
    }
}
