//! Error types for stock research operations

use thiserror::Error;

/// Stock research specific errors
#[derive(Debug, Error)]
pub enum ResearchError {
    /// Required configuration is missing or malformed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Ticker was empty after normalization
    #[error("ticker is required")]
    InvalidTicker,

    /// Upstream API answered with an error
    #[error("API error: {0}")]
    Api(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Feed or document could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Chat-completion backend failed
    #[error("LLM error: {0}")]
    Llm(#[from] research_llm::LLMError),

    /// Prompt template failed to render
    #[error("Prompt error: {0}")]
    Prompt(#[from] minijinja::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for research operations
pub type Result<T> = std::result::Result<T, ResearchError>;

impl From<research_utils::ConfigError> for ResearchError {
    fn from(err: research_utils::ConfigError) -> Self {
        ResearchError::Configuration(err.to_string())
    }
}

impl From<quick_xml::DeError> for ResearchError {
    fn from(err: quick_xml::DeError) -> Self {
        ResearchError::Parse(err.to_string())
    }
}

/// Convert ResearchError to research_core::Error
impl From<ResearchError> for research_core::Error {
    fn from(err: ResearchError) -> Self {
        match err {
            ResearchError::Configuration(msg) => research_core::Error::Configuration(msg),
            ResearchError::InvalidTicker => research_core::Error::InvalidInput(err.to_string()),
            other => research_core::Error::ProcessingFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(ResearchError::InvalidTicker.to_string(), "ticker is required");

        let err = ResearchError::Configuration("Set GROQ_API_KEY or XAI_API_KEY.".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: Set GROQ_API_KEY or XAI_API_KEY."
        );
    }

    #[test]
    fn test_error_conversion() {
        let core: research_core::Error = ResearchError::Api("boom".to_string()).into();
        match core {
            research_core::Error::ProcessingFailed(msg) => assert!(msg.contains("API error")),
            _ => panic!("Expected ProcessingFailed variant"),
        }

        let core: research_core::Error = ResearchError::Configuration("x".to_string()).into();
        assert!(matches!(core, research_core::Error::Configuration(_)));
    }
}
