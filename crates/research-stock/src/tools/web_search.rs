//! Web search with an ordered fallback chain
//!
//! 1. Keyed provider (Serper), only when opted in with a plausible key and a
//!    probe succeeded. One runtime failure disables it for the rest of this
//!    instance's life.
//! 2. News feed headlines.
//! 3. Instant-answer abstract and related topics, only when the feed had
//!    nothing.
//!
//! The chain never fails; the worst case is a "limited data" notice.

use async_trait::async_trait;
use research_tools::Tool;
use research_utils::truncate_with_marker;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::api::{InstantAnswer, NewsFeed, SearchProvider};

/// Character budget of one search answer
pub const WEB_SEARCH_BUDGET: usize = 700;

const PRIMARY_RESULTS: usize = 3;
const FALLBACK_RESULTS: usize = 4;

const PROVIDER_DISABLED: &str =
    "Serper unavailable (auth failed, missing key, or service issue). Using fallback search.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProviderState {
    Unprobed,
    Enabled,
    Disabled,
}

/// Fallback-chain web search
pub struct WebSearch {
    provider: Option<Arc<dyn SearchProvider>>,
    news: Arc<dyn NewsFeed>,
    instant: Arc<dyn InstantAnswer>,
    state: Mutex<ProviderState>,
}

impl WebSearch {
    /// `provider` is `None` when the keyed search is not opted in or has no usable key
    pub fn new(
        provider: Option<Arc<dyn SearchProvider>>,
        news: Arc<dyn NewsFeed>,
        instant: Arc<dyn InstantAnswer>,
    ) -> Self {
        let state = if provider.is_some() {
            ProviderState::Unprobed
        } else {
            ProviderState::Disabled
        };
        Self {
            provider,
            news,
            instant,
            state: Mutex::new(state),
        }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// The provider if it is usable, probing it on first use
    async fn active_provider(&self) -> Option<&Arc<dyn SearchProvider>> {
        let provider = self.provider.as_ref()?;
        let mut state = self.state.lock().await;
        if *state == ProviderState::Unprobed {
            *state = match provider.probe().await {
                Ok(true) => ProviderState::Enabled,
                Ok(false) => {
                    info!("Search provider rejected the probe, using fallback search");
                    ProviderState::Disabled
                }
                Err(e) => {
                    warn!(error = %e, "Search provider probe failed, using fallback search");
                    ProviderState::Disabled
                }
            };
        }
        (*state == ProviderState::Enabled).then_some(provider)
    }

    async fn disable_provider(&self) {
        *self.state.lock().await = ProviderState::Disabled;
    }

    /// Search `query`; the answer always starts with `Query: <query>`
    pub async fn search(&self, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            return "Query is required.".to_string();
        }

        let mut lines = vec![format!("Query: {query}")];
        match self.active_provider().await {
            Some(provider) => match provider.search(query).await {
                Ok(results) => {
                    push_titles(
                        &mut lines,
                        "Top web results:",
                        results.organic.iter().map(|hit| hit.title.as_str()),
                        PRIMARY_RESULTS,
                    );
                    push_titles(
                        &mut lines,
                        "Top news results:",
                        results.news.iter().map(|hit| hit.title.as_str()),
                        PRIMARY_RESULTS,
                    );
                }
                Err(e) => {
                    warn!(error = %e, "Search provider failed, disabling it");
                    self.disable_provider().await;
                    lines.push(format!("Serper unavailable ({e}). Using fallback search."));
                    lines.extend(self.fallback(query).await);
                }
            },
            None => {
                lines.push(PROVIDER_DISABLED.to_string());
                lines.extend(self.fallback(query).await);
            }
        }

        truncate_with_marker(lines.join("\n").trim(), WEB_SEARCH_BUDGET)
    }

    async fn fallback(&self, query: &str) -> Vec<String> {
        let mut lines = Vec::new();

        match self.news.search(query).await {
            Ok(items) if !items.is_empty() => {
                push_titles(
                    &mut lines,
                    "Fallback news results:",
                    items.iter().map(|item| item.title.as_str()),
                    FALLBACK_RESULTS,
                );
                return lines;
            }
            Ok(_) => debug!(query, "Fallback news feed returned nothing"),
            Err(e) => debug!(query, error = %e, "Fallback news feed failed"),
        }

        match self.instant.lookup(query).await {
            Ok(answer) => {
                if !answer.abstract_text.is_empty() {
                    lines.push("Fallback abstract:".to_string());
                    lines.push(format!("- {}", answer.abstract_text));
                    if !answer.abstract_url.is_empty() {
                        lines.push(format!("  Source: {}", answer.abstract_url));
                    }
                }
                push_titles(
                    &mut lines,
                    "Fallback related topics:",
                    answer.related.iter().map(String::as_str),
                    FALLBACK_RESULTS,
                );
            }
            Err(e) => warn!(query, error = %e, "Instant-answer lookup failed"),
        }

        if lines.is_empty() {
            lines.push("Fallback search returned limited data.".to_string());
        }
        lines
    }
}

/// Append `heading` and up to `limit` bullets, or nothing when there are no titles
fn push_titles<'a>(
    lines: &mut Vec<String>,
    heading: &str,
    titles: impl Iterator<Item = &'a str>,
    limit: usize,
) {
    let bullets: Vec<String> = titles
        .take(limit)
        .map(|title| format!("- {}", title.trim()))
        .collect();
    if !bullets.is_empty() {
        lines.push(heading.to_string());
        lines.extend(bullets);
    }
}

#[derive(Debug, Deserialize)]
struct WebSearchParams {
    #[serde(default)]
    query: String,
}

/// Tool wrapper around [`WebSearch`]
pub struct WebSearchTool {
    search: WebSearch,
}

impl WebSearchTool {
    pub fn new(search: WebSearch) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    async fn execute(&self, params: Value) -> research_core::Result<String> {
        let params: WebSearchParams = serde_json::from_value(params)?;
        Ok(self.search.search(&params.query).await)
    }

    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for recent information. Falls back to news headlines and \
         instant answers when the primary search provider is unavailable."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query"
                }
            },
            "required": ["query"]
        })
    }
}
