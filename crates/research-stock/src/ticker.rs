//! Ticker normalization

use crate::error::{ResearchError, Result};
use serde::Serialize;
use std::fmt;

/// A trimmed, upper-cased stock symbol
///
/// Only emptiness is checked locally; unknown symbols surface downstream as
/// "no filing found" text rather than as errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Normalize raw input. Empty or whitespace-only input is rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let symbol = raw.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(ResearchError::InvalidTicker);
        }
        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
