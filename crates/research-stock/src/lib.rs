//! Equity research pipeline
//!
//! Given a ticker, gathers recent headlines and excerpts of the latest 10-Q and
//! 10-K, then asks a chat model for a short markdown report.
//!
//! # Example
//!
//! ```no_run
//! use research_stock::{ResearchConfig, StockResearcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ResearchConfig::from_env()?;
//!     let researcher = StockResearcher::new(&config)?;
//!
//!     let analysis = researcher.analyze("aapl").await?;
//!     println!("{}", analysis.report);
//!     Ok(())
//! }
//! ```
//!
//! Upstream failures never abort a run. They are described in the context text
//! the model sees; only an empty ticker or missing LLM credentials are errors.

pub mod api;
pub mod config;
pub mod error;
pub mod html;
pub mod prompts;
pub mod research;
pub mod snippet;
pub mod sources;
pub mod ticker;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{LlmConfig, LlmSettings, ProviderKind, ResearchConfig, Timeouts};
pub use error::{ResearchError, Result};
pub use research::{Analysis, ContextAggregator, ReportGenerator, ResearchContext, StockResearcher};
pub use snippet::{SnippetWindow, extract_snippet};
pub use sources::Sources;
pub use ticker::Ticker;
pub use tools::default_registry;
