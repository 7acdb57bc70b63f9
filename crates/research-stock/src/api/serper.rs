//! Serper (google.serper.dev) keyed web search

use super::{SearchProvider, SearchResults};
use crate::error::{ResearchError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const SERPER_SEARCH_URL: &str = "https://google.serper.dev/search";

/// Serper client with separate probe and query timeouts
pub struct SerperClient {
    client: Client,
    api_key: String,
    probe_timeout: Duration,
    query_timeout: Duration,
}

impl SerperClient {
    pub fn new(api_key: impl Into<String>, probe_timeout: Duration, query_timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key: api_key.into(),
            probe_timeout,
            query_timeout,
        })
    }

    fn request(&self, query: &str, timeout: Duration) -> reqwest::RequestBuilder {
        self.client
            .post(SERPER_SEARCH_URL)
            .header("X-API-KEY", &self.api_key)
            .timeout(timeout)
            .json(&json!({ "q": query }))
    }
}

#[async_trait]
impl SearchProvider for SerperClient {
    async fn probe(&self) -> Result<bool> {
        let response = self.request("test", self.probe_timeout).send().await?;
        debug!(status = %response.status(), "Serper probe");
        Ok(response.status() == reqwest::StatusCode::OK)
    }

    async fn search(&self, query: &str) -> Result<SearchResults> {
        let response = self.request(query, self.query_timeout).send().await?;
        if !response.status().is_success() {
            return Err(ResearchError::Api(format!(
                "Serper returned {}",
                response.status()
            )));
        }
        Ok(response.json().await?)
    }
}
