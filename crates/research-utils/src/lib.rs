//! Shared utilities for the stock research workspace
//!
//! This crate provides common functionality used across the workspace,
//! including logging setup, environment-driven configuration helpers, and
//! character-budget text truncation.

pub mod config;
pub mod logging;
pub mod text;

pub use config::{ConfigError, EnvSource, ProcessEnv};
pub use logging::init_tracing;
pub use text::{TRUNCATION_MARKER, truncate_chars, truncate_with_marker};
