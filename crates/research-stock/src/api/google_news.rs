//! Google News RSS search
//!
//! No key required. The feed is RSS 2.0; only item title, link and pubDate are
//! read.

use super::{NewsFeed, NewsItem};
use crate::error::{ResearchError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

const GOOGLE_NEWS_RSS_URL: &str = "https://news.google.com/rss/search";

#[derive(Debug, Deserialize)]
struct RssDocument {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(rename = "pubDate", default)]
    pub_date: Option<String>,
}

/// Google News RSS client
pub struct GoogleNewsClient {
    client: Client,
}

impl GoogleNewsClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Search URL for `query`, US English edition
    pub fn search_url(query: &str) -> Result<Url> {
        Url::parse_with_params(
            GOOGLE_NEWS_RSS_URL,
            &[("q", query), ("hl", "en-US"), ("gl", "US"), ("ceid", "US:en")],
        )
        .map_err(|e| ResearchError::Other(format!("invalid news URL: {e}")))
    }
}

#[async_trait]
impl NewsFeed for GoogleNewsClient {
    async fn search(&self, query: &str) -> Result<Vec<NewsItem>> {
        let url = Self::search_url(query)?;
        debug!(%url, "Fetching news feed");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ResearchError::Api(format!(
                "news feed returned {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        parse_rss(&body)
    }
}

/// Parse an RSS 2.0 document into news items
pub fn parse_rss(xml: &str) -> Result<Vec<NewsItem>> {
    let document: RssDocument = quick_xml::de::from_str(xml)?;
    Ok(document
        .channel
        .items
        .into_iter()
        .map(|item| NewsItem {
            title: item.title.unwrap_or_default().trim().to_string(),
            link: item.link.unwrap_or_default().trim().to_string(),
            published: item.pub_date.map(|d| d.trim().to_string()),
        })
        .collect())
}
