//! Error type shared by research tools
//!
//! Domain crates convert their own errors into [`Error`] so every tool reports
//! bad input the same way.

pub mod error;

pub use error::{Error, Result};
