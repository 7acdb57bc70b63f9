//! SEC filing excerpts
//!
//! Finds the newest 10-Q/10-K, downloads the detail page, flattens it to text
//! and keeps the window most relevant to a query. Each way this can fail ends
//! in its own one-line explanation instead of an error.

use async_trait::async_trait;
use research_tools::Tool;
use research_utils::truncate_with_marker;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::{DocumentFetcher, FilingSearch, FormType};
use crate::html::filing_text;
use crate::snippet::{SnippetWindow, extract_snippet};
use crate::ticker::Ticker;

/// Character budget of the snippet inside one filing record
pub const FILING_RECORD_BUDGET: usize = 1200;

/// Filing lookup plus snippet extraction
#[derive(Clone)]
pub struct FilingRetriever {
    /// `None` when no sec-api.io key is configured
    search: Option<Arc<dyn FilingSearch>>,
    documents: Arc<dyn DocumentFetcher>,
    window: SnippetWindow,
}

impl FilingRetriever {
    pub fn new(search: Option<Arc<dyn FilingSearch>>, documents: Arc<dyn DocumentFetcher>) -> Self {
        Self {
            search,
            documents,
            window: SnippetWindow::FILING,
        }
    }

    /// Use a different snippet window
    pub fn with_window(mut self, window: SnippetWindow) -> Self {
        self.window = window;
        self
    }

    pub fn window(&self) -> SnippetWindow {
        self.window
    }

    /// Describe the newest `form` filing of `ticker` around `search_query`
    pub async fn fetch_filing(&self, ticker: &str, form: FormType, search_query: &str) -> String {
        let Some(search) = &self.search else {
            return format!("{form}: SEC_API_API_KEY missing.");
        };

        let filing = match search.latest_filing(ticker, form).await {
            Ok(Some(filing)) => filing,
            Ok(None) => return format!("{form}: no filing found."),
            Err(e) => {
                warn!(ticker, form = %form, error = %e, "Filing search failed");
                return format!("{form}: filing search failed: {e}");
            }
        };

        let Some(url) = filing.detail_url.as_deref() else {
            return format!("{form}: filing found but URL missing.");
        };

        let text = match self.documents.fetch_html(url).await {
            Ok(html) => filing_text(&html),
            Err(e) => {
                warn!(url, error = %e, "Filing fetch failed");
                String::new()
            }
        };
        if text.is_empty() {
            return format!("{form}: unable to fetch filing text.");
        }

        let snippet = extract_snippet(&text, search_query, self.window);
        debug!(
            url,
            text_chars = text.chars().count(),
            snippet_chars = snippet.chars().count(),
            "Extracted filing snippet"
        );

        format!(
            "{form} filed at {}\nSource: {url}\nSnippet:\n{}",
            filing.filed_at.as_deref().unwrap_or("N/A"),
            truncate_with_marker(snippet, FILING_RECORD_BUDGET)
        )
    }
}

#[derive(Debug, Deserialize)]
struct FilingParams {
    ticker: String,
    form_type: String,
    search_query: String,
}

/// Tool wrapper around [`FilingRetriever`]
pub struct FilingSearchTool {
    retriever: FilingRetriever,
}

impl FilingSearchTool {
    /// The tool always searches with the compact window
    pub fn new(retriever: FilingRetriever) -> Self {
        Self {
            retriever: retriever.with_window(SnippetWindow::COMPACT),
        }
    }
}

#[async_trait]
impl Tool for FilingSearchTool {
    async fn execute(&self, params: Value) -> research_core::Result<String> {
        let params: FilingParams = serde_json::from_value(params)?;
        let ticker = Ticker::parse(&params.ticker)?;
        let form: FormType = params
            .form_type
            .parse()
            .map_err(|e| research_core::Error::InvalidInput(format!("{e}")))?;

        Ok(self
            .retriever
            .fetch_filing(ticker.as_str(), form, &params.search_query)
            .await)
    }

    fn name(&self) -> &str {
        "sec_filing_search"
    }

    fn description(&self) -> &str {
        "Search the latest 10-Q or 10-K of a company and return the passage most relevant \
         to a query, with the filing date and source URL."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "ticker": {
                    "type": "string",
                    "description": "Stock ticker symbol"
                },
                "form_type": {
                    "type": "string",
                    "enum": ["10-Q", "10-K"],
                    "description": "Filing form"
                },
                "search_query": {
                    "type": "string",
                    "description": "What to look for in the filing"
                }
            },
            "required": ["ticker", "form_type", "search_query"]
        })
    }
}
