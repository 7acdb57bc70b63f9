//! SEC EDGAR document fetcher
//!
//! Downloads filing detail pages from www.sec.gov.
//!
//! Rate limit: 10 requests per second (as per SEC fair access policy)
//! User-Agent requirement: Must include company name and contact email

use super::DocumentFetcher;
use crate::error::{ResearchError, Result};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use reqwest::header::USER_AGENT;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

const SEC_REQUESTS_PER_SECOND: u32 = 10;

/// Rate-limited www.sec.gov page client
pub struct SecDocumentClient {
    client: Client,
    user_agent: String,
    rate_limiter: SharedRateLimiter,
}

impl SecDocumentClient {
    /// Create a client sending `user_agent` on every request
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        let per_second = NonZeroU32::new(SEC_REQUESTS_PER_SECOND).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(per_second)));

        Ok(Self {
            client,
            user_agent: user_agent.into(),
            rate_limiter,
        })
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[async_trait]
impl DocumentFetcher for SecDocumentClient {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        self.rate_limiter.until_ready().await;
        debug!(url, "Fetching SEC document");

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ResearchError::Api(format!(
                "SEC returned {} for {url}",
                response.status()
            )));
        }

        Ok(response.text().await?)
    }
}
