//! Readable text of a single web page

use async_trait::async_trait;
use research_tools::Tool;
use research_utils::truncate_with_marker;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use url::Url;

use crate::api::DocumentFetcher;
use crate::html::page_text;

/// Character budget of one page
pub const WEBSITE_BUDGET: usize = 900;

#[derive(Debug, Deserialize)]
struct WebsiteParams {
    website_url: String,
}

/// Fetches a page and returns its text with link targets kept
pub struct ReadWebsiteTool {
    fetcher: Arc<dyn DocumentFetcher>,
}

impl ReadWebsiteTool {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>) -> Self {
        Self { fetcher }
    }

    pub async fn read(&self, website_url: &str) -> String {
        let url = match Url::parse(website_url.trim()) {
            Ok(url) => url,
            Err(e) => return format!("Unable to read website content from {website_url}: {e}"),
        };

        match self.fetcher.fetch_html(url.as_str()).await {
            Ok(html) => truncate_with_marker(&page_text(&html), WEBSITE_BUDGET),
            Err(e) => format!("Unable to read website content from {website_url}: {e}"),
        }
    }
}

#[async_trait]
impl Tool for ReadWebsiteTool {
    async fn execute(&self, params: Value) -> research_core::Result<String> {
        let params: WebsiteParams = serde_json::from_value(params)?;
        Ok(self.read(&params.website_url).await)
    }

    fn name(&self) -> &str {
        "read_website_content"
    }

    fn description(&self) -> &str {
        "Fetch readable text from a webpage URL. Links are kept as `text (url)`."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "website_url": {
                    "type": "string",
                    "description": "Absolute http(s) URL"
                }
            },
            "required": ["website_url"]
        })
    }
}
