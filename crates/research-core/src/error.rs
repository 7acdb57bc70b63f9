//! Errors a tool can return instead of text

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure crossing a tool boundary
///
/// Upstream outages are not errors at this level; tools describe them in
/// their output text.
#[derive(Error, Debug)]
pub enum Error {
    /// Parameters did not match the tool's input schema
    #[error("Invalid parameters: {0}")]
    InvalidParameters(#[from] serde_json::Error),

    /// Parameters parsed but a value is unusable (empty ticker, unknown form)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_errors_convert() {
        fn parse(raw: serde_json::Value) -> Result<u32> {
            Ok(serde_json::from_value(raw)?)
        }

        let err = parse(serde_json::json!("seven")).unwrap_err();
        assert!(matches!(err, Error::InvalidParameters(_)));
        assert!(err.to_string().starts_with("Invalid parameters: "));
    }

    #[test]
    fn test_display() {
        let err = Error::InvalidInput("ticker is required".to_string());
        assert_eq!(err.to_string(), "Invalid input: ticker is required");
    }
}
