//! Report context assembly

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument};

use crate::api::FormType;
use crate::ticker::Ticker;
use crate::tools::{FilingRetriever, NewsSearcher};
use crate::tools::news::DEFAULT_NEWS_LIMIT;

/// Query used to pick the excerpt of each filing
pub const FILING_QUERY: &str = "MD&A guidance risks cash flow liquidity outlook";

/// General sentiment news query
pub fn sentiment_query(ticker: &Ticker) -> String {
    format!("{ticker} stock news market sentiment")
}

/// Earnings and catalyst news query
pub fn earnings_query(ticker: &Ticker) -> String {
    format!("{ticker} earnings date guidance")
}

/// Everything the report prompt is grounded on
///
/// Rendered through `Display` in a fixed order.
#[derive(Debug, Clone, Serialize)]
pub struct ResearchContext {
    pub timestamp: DateTime<Utc>,
    pub ticker: Ticker,
    pub news: String,
    pub earnings: String,
    pub quarterly: String,
    pub annual: String,
}

impl fmt::Display for ResearchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Timestamp: {}\nTicker: {}\n\n\
             Recent News:\n{}\n\n\
             Earnings/Catalysts:\n{}\n\n\
             10-Q Context:\n{}\n\n\
             10-K Context:\n{}\n",
            self.timestamp.format("%Y-%m-%d %H:%M UTC"),
            self.ticker,
            self.news,
            self.earnings,
            self.quarterly,
            self.annual,
        )
    }
}

/// Runs the four context lookups in sequence
#[derive(Clone)]
pub struct ContextAggregator {
    news: NewsSearcher,
    filings: FilingRetriever,
}

impl ContextAggregator {
    pub fn new(news: NewsSearcher, filings: FilingRetriever) -> Self {
        Self { news, filings }
    }

    /// Sentiment news, earnings news, 10-Q, then 10-K
    #[instrument(skip(self), fields(ticker = %ticker))]
    pub async fn build(&self, ticker: &Ticker) -> ResearchContext {
        let timestamp = Utc::now();

        let news = self
            .news
            .search_news(&sentiment_query(ticker), DEFAULT_NEWS_LIMIT)
            .await;
        let earnings = self
            .news
            .search_news(&earnings_query(ticker), DEFAULT_NEWS_LIMIT)
            .await;
        let quarterly = self
            .filings
            .fetch_filing(ticker.as_str(), FormType::TenQ, FILING_QUERY)
            .await;
        let annual = self
            .filings
            .fetch_filing(ticker.as_str(), FormType::TenK, FILING_QUERY)
            .await;

        debug!("Context assembled");
        ResearchContext {
            timestamp,
            ticker: ticker.clone(),
            news,
            earnings,
            quarterly,
            annual,
        }
    }
}
