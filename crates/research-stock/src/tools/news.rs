//! Headline search rendered as a bullet list

use async_trait::async_trait;
use research_tools::Tool;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::warn;

use crate::api::NewsFeed;

/// Default number of headlines
pub const DEFAULT_NEWS_LIMIT: usize = 5;

/// Turns feed results into `- title\n  link` lines; never fails
#[derive(Clone)]
pub struct NewsSearcher {
    feed: Arc<dyn NewsFeed>,
}

impl NewsSearcher {
    pub fn new(feed: Arc<dyn NewsFeed>) -> Self {
        Self { feed }
    }

    /// Up to `limit` headlines for `query`, or a sentence explaining why there are none
    pub async fn search_news(&self, query: &str, limit: usize) -> String {
        match self.feed.search(query).await {
            Ok(items) if items.is_empty() || limit == 0 => "No recent news found.".to_string(),
            Ok(items) => items
                .iter()
                .take(limit)
                .map(|item| format!("- {}\n  {}", item.title, item.link))
                .collect::<Vec<_>>()
                .join("\n"),
            Err(e) => {
                warn!(query, error = %e, "News lookup failed");
                format!("News lookup failed: {e}")
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct NewsParams {
    query: String,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_NEWS_LIMIT
}

/// Tool wrapper around [`NewsSearcher`]
pub struct NewsSearchTool {
    searcher: NewsSearcher,
}

impl NewsSearchTool {
    pub fn new(searcher: NewsSearcher) -> Self {
        Self { searcher }
    }
}

#[async_trait]
impl Tool for NewsSearchTool {
    async fn execute(&self, params: Value) -> research_core::Result<String> {
        let params: NewsParams = serde_json::from_value(params)?;

        Ok(self.searcher.search_news(&params.query, params.limit).await)
    }

    fn name(&self) -> &str {
        "news_search"
    }

    fn description(&self) -> &str {
        "Search recent news headlines for a topic. Returns up to `limit` headlines with links."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search topic, e.g. 'AAPL earnings date guidance'"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of headlines",
                    "default": DEFAULT_NEWS_LIMIT
                }
            },
            "required": ["query"]
        })
    }
}
