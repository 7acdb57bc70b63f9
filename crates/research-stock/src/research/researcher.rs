//! End-to-end analysis of one ticker

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

use research_llm::LLMProvider;

use super::context::{ContextAggregator, ResearchContext};
use super::report::ReportGenerator;
use crate::config::ResearchConfig;
use crate::error::Result;
use crate::sources::Sources;
use crate::ticker::Ticker;
use crate::tools::{FilingRetriever, NewsSearcher};

/// Outcome of one analysis
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub ticker: Ticker,
    pub report: String,
}

/// Ticker in, markdown report out
#[derive(Clone)]
pub struct StockResearcher {
    aggregator: ContextAggregator,
    reporter: ReportGenerator,
    default_ticker: String,
}

impl StockResearcher {
    /// Researcher backed by the production clients
    pub fn new(config: &ResearchConfig) -> Result<Self> {
        Ok(Self::with_sources(config, &Sources::from_config(config)?))
    }

    /// Researcher backed by `sources`
    pub fn with_sources(config: &ResearchConfig, sources: &Sources) -> Self {
        let aggregator = ContextAggregator::new(
            NewsSearcher::new(sources.news.clone()),
            FilingRetriever::new(sources.filings.clone(), sources.sec_documents.clone()),
        );
        Self {
            aggregator,
            reporter: ReportGenerator::new(config.llm.clone(), config.timeouts.llm),
            default_ticker: config.default_ticker.clone(),
        }
    }

    /// Route report generation to `provider`
    pub fn with_provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.reporter = self.reporter.with_provider(provider);
        self
    }

    /// Ticker used when a caller does not name one
    pub fn default_ticker(&self) -> &str {
        &self.default_ticker
    }

    /// Normalize, check LLM configuration, gather context, then write the report.
    ///
    /// An empty ticker or missing LLM keys fail before any network call.
    #[instrument(skip(self))]
    pub async fn analyze(&self, raw_ticker: &str) -> Result<Analysis> {
        let ticker = Ticker::parse(raw_ticker)?;
        let settings = self.reporter.settings()?;
        info!(ticker = %ticker, provider = settings.provider.as_str(), "Starting analysis");

        let context = self.aggregator.build(&ticker).await.to_string();
        let report = self.reporter.generate(ticker.as_str(), &context).await?;

        info!(ticker = %ticker, report_chars = report.chars().count(), "Analysis complete");
        Ok(Analysis { ticker, report })
    }

    /// Context only, no LLM involved
    pub async fn build_context(&self, raw_ticker: &str) -> Result<ResearchContext> {
        let ticker = Ticker::parse(raw_ticker)?;
        Ok(self.aggregator.build(&ticker).await)
    }
}
