//! Errors from chat-completion backends

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LLMError>;

#[derive(Error, Debug)]
pub enum LLMError {
    /// Backend answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("API key rejected (HTTP {0})")]
    Unauthorized(u16),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Transport failure: connect, timeout, body read
    #[cfg(feature = "openai")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Body was not a chat-completion payload
    #[error("Unexpected response format: {0}")]
    Decode(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    RequestFailed(String),
}

impl LLMError {
    /// Classify a non-success HTTP status and its body text
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => Self::Unauthorized(status),
            429 => Self::RateLimited(body),
            _ => Self::Status { status, body },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert!(matches!(LLMError::from_status(401, String::new()), LLMError::Unauthorized(401)));
        assert!(matches!(LLMError::from_status(429, "slow down".into()), LLMError::RateLimited(_)));
        assert_eq!(
            LLMError::from_status(500, "upstream".into()).to_string(),
            "HTTP 500: upstream"
        );
    }
}
