//! Plain web page fetcher

use super::DocumentFetcher;
use crate::error::{ResearchError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Fetches arbitrary pages with reqwest's default headers
pub struct WebPageClient {
    client: Client,
}

impl WebPageClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentFetcher for WebPageClient {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ResearchError::Api(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }
        Ok(response.text().await?)
    }
}
