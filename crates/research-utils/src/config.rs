//! Environment-driven configuration helpers
//!
//! Configuration is read through [`EnvSource`] rather than `std::env` directly so
//! callers can build a config from the process environment in binaries and from
//! a plain map in tests.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading configuration values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was present but could not be parsed
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// A source of configuration variables
pub trait EnvSource {
    /// Raw lookup, `None` when the variable is unset
    fn raw(&self, key: &str) -> Option<String>;

    /// Trimmed value; blank values count as unset
    fn string(&self, key: &str) -> Option<String> {
        self.raw(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Trimmed value or `default`
    fn string_or(&self, key: &str, default: &str) -> String {
        self.string(key).unwrap_or_else(|| default.to_string())
    }

    /// Opt-in flag: true for `1`, `true`, `yes` (case-insensitive)
    fn flag(&self, key: &str) -> bool {
        self.string(key).is_some_and(|v| {
            let v = v.to_ascii_lowercase();
            matches!(v.as_str(), "1" | "true" | "yes")
        })
    }

    /// Parse the value with [`FromStr`], falling back to `default` when unset
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.string(key) {
            None => Ok(default),
            Some(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                reason: e.to_string(),
                value,
            }),
        }
    }
}

/// Reads from the real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn raw(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn raw(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn raw(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| (*v).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_blank_values_are_unset() {
        let source = env(&[("KEY", "   "), ("OTHER", "  value ")]);
        assert_eq!(source.string("KEY"), None);
        assert_eq!(source.string("OTHER").as_deref(), Some("value"));
        assert_eq!(source.string_or("MISSING", "fallback"), "fallback");
    }

    #[test]
    fn test_flag_values() {
        let source = env(&[("A", "TRUE"), ("B", "yes"), ("C", "1"), ("D", "false"), ("E", "on")]);
        assert!(source.flag("A"));
        assert!(source.flag("B"));
        assert!(source.flag("C"));
        assert!(!source.flag("D"));
        assert!(!source.flag("E"));
        assert!(!source.flag("UNSET"));
    }

    #[test]
    fn test_parse_or() {
        let source = env(&[("MAX_TOKENS", "512"), ("TEMPERATURE", "hot")]);
        assert_eq!(source.parse_or("MAX_TOKENS", 450_usize), Ok(512));
        assert_eq!(source.parse_or("UNSET", 450_usize), Ok(450));

        let err = source.parse_or("TEMPERATURE", 0.2_f32).unwrap_err();
        assert!(err.to_string().contains("TEMPERATURE"));
    }
}
