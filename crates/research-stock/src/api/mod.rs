//! Upstream data sources
//!
//! Every external service sits behind a small trait so the research pipeline
//! can be exercised with in-process fakes. The concrete `reqwest` clients live
//! in the submodules.

pub mod duckduckgo;
pub mod google_news;
pub mod sec_api;
pub mod sec_edgar;
pub mod serper;
pub mod web;

pub use duckduckgo::DuckDuckGoClient;
pub use google_news::GoogleNewsClient;
pub use sec_api::SecApiClient;
pub use sec_edgar::SecDocumentClient;
pub use serper::SerperClient;
pub use web::WebPageClient;

use crate::error::{ResearchError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One headline from a news feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub published: Option<String>,
}

/// Headline search
#[async_trait]
pub trait NewsFeed: Send + Sync {
    /// All items the feed returns for `query`, in feed order
    async fn search(&self, query: &str) -> Result<Vec<NewsItem>>;
}

/// Periodic report forms the pipeline knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormType {
    /// Quarterly report
    #[serde(rename = "10-Q")]
    TenQ,
    /// Annual report
    #[serde(rename = "10-K")]
    TenK,
}

impl FormType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::TenQ => "10-Q",
            FormType::TenK => "10-K",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormType {
    type Err = ResearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "10-Q" => Ok(FormType::TenQ),
            "10-K" => Ok(FormType::TenK),
            other => Err(ResearchError::Other(format!(
                "unsupported form type '{other}', expected 10-Q or 10-K"
            ))),
        }
    }
}

/// Filing metadata returned by a filing search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filing {
    pub form_type: String,
    pub filed_at: Option<String>,
    pub detail_url: Option<String>,
}

/// Full-text filing search
#[async_trait]
pub trait FilingSearch: Send + Sync {
    /// Newest filing of `form` for `ticker`, if any
    async fn latest_filing(&self, ticker: &str, form: FormType) -> Result<Option<Filing>>;
}

/// Fetches raw HTML for a URL
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch_html(&self, url: &str) -> Result<String>;
}

/// One search hit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: Option<String>,
}

/// Keyed web search response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub organic: Vec<SearchHit>,
    #[serde(default)]
    pub news: Vec<SearchHit>,
}

/// Keyed web search provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Cheap authenticated request; `Ok(true)` when the provider accepts the key
    async fn probe(&self) -> Result<bool>;

    /// Run a query
    async fn search(&self, query: &str) -> Result<SearchResults>;
}

/// Instant-answer lookup, related topics already flattened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstantAnswerResult {
    pub abstract_text: String,
    pub abstract_url: String,
    pub related: Vec<String>,
}

/// Keyless instant-answer search
#[async_trait]
pub trait InstantAnswer: Send + Sync {
    async fn lookup(&self, query: &str) -> Result<InstantAnswerResult>;
}
