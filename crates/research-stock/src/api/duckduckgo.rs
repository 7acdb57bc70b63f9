//! DuckDuckGo instant-answer API
//!
//! Keyless. `RelatedTopics` mixes plain entries with named groups whose own
//! `Topics` hold further entries; groups are flattened one level.

use super::{InstantAnswer, InstantAnswerResult};
use crate::error::{ResearchError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::IgnoredAny;
use std::time::Duration;
use url::Url;

const DUCKDUCKGO_API_URL: &str = "https://api.duckduckgo.com/";

#[derive(Debug, Deserialize)]
struct DdgResponse {
    #[serde(rename = "AbstractText", default)]
    abstract_text: Option<String>,
    #[serde(rename = "AbstractURL", default)]
    abstract_url: Option<String>,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RelatedTopic {
    Entry {
        #[serde(rename = "Text")]
        text: String,
    },
    Group {
        #[serde(rename = "Topics")]
        topics: Vec<RelatedTopic>,
    },
    Other(IgnoredAny),
}

impl DdgResponse {
    fn into_result(self) -> InstantAnswerResult {
        let mut related = Vec::new();
        for topic in self.related_topics {
            match topic {
                RelatedTopic::Entry { text } => related.push(text),
                RelatedTopic::Group { topics } => {
                    related.extend(topics.into_iter().filter_map(|sub| match sub {
                        RelatedTopic::Entry { text } => Some(text),
                        _ => None,
                    }));
                }
                RelatedTopic::Other(_) => {}
            }
        }

        InstantAnswerResult {
            abstract_text: self.abstract_text.unwrap_or_default().trim().to_string(),
            abstract_url: self.abstract_url.unwrap_or_default().trim().to_string(),
            related,
        }
    }
}

/// DuckDuckGo instant-answer client
pub struct DuckDuckGoClient {
    client: Client,
}

impl DuckDuckGoClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn lookup_url(query: &str) -> Result<Url> {
        Url::parse_with_params(
            DUCKDUCKGO_API_URL,
            &[("q", query), ("format", "json"), ("no_html", "1"), ("no_redirect", "1")],
        )
        .map_err(|e| ResearchError::Other(format!("invalid instant-answer URL: {e}")))
    }
}

/// Parse an instant-answer JSON body
pub fn parse_instant_answer(body: &str) -> Result<InstantAnswerResult> {
    let response: DdgResponse = serde_json::from_str(body)?;
    Ok(response.into_result())
}

#[async_trait]
impl InstantAnswer for DuckDuckGoClient {
    async fn lookup(&self, query: &str) -> Result<InstantAnswerResult> {
        let response = self.client.get(Self::lookup_url(query)?).send().await?;
        if !response.status().is_success() {
            return Err(ResearchError::Api(format!(
                "DuckDuckGo returned {}",
                response.status()
            )));
        }
        // served as application/x-javascript, so decode the text ourselves
        let body = response.text().await?;
        parse_instant_answer(&body)
    }
}
