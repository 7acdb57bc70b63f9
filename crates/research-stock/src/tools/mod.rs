//! Research tools exposed through a [`ToolRegistry`]

pub mod calculator;
pub mod filings;
pub mod news;
pub mod web_search;
pub mod website;

pub use calculator::CalculatorTool;
pub use filings::{FilingRetriever, FilingSearchTool};
pub use news::{NewsSearchTool, NewsSearcher};
pub use web_search::{WebSearch, WebSearchTool};
pub use website::ReadWebsiteTool;

use research_tools::ToolRegistry;
use std::sync::Arc;

use crate::config::ResearchConfig;
use crate::error::Result;
use crate::sources::Sources;

/// Registry with every research tool wired to production clients
pub fn default_registry(config: &ResearchConfig) -> Result<ToolRegistry> {
    Ok(registry_from_sources(&Sources::from_config(config)?))
}

/// Registry with every research tool wired to `sources`
pub fn registry_from_sources(sources: &Sources) -> ToolRegistry {
    let registry = ToolRegistry::new();

    registry.register(Arc::new(NewsSearchTool::new(NewsSearcher::new(
        sources.news.clone(),
    ))));
    registry.register(Arc::new(FilingSearchTool::new(FilingRetriever::new(
        sources.filings.clone(),
        sources.sec_documents.clone(),
    ))));
    registry.register(Arc::new(WebSearchTool::new(WebSearch::new(
        sources.search.clone(),
        sources.news.clone(),
        sources.instant.clone(),
    ))));
    registry.register(Arc::new(ReadWebsiteTool::new(sources.web_pages.clone())));
    registry.register(Arc::new(CalculatorTool::new()));

    registry
}
