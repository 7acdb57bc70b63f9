//! sec-api.io full-text query client
//!
//! Used only to locate the newest 10-Q/10-K for a ticker. The filing body
//! itself is downloaded from www.sec.gov by [`super::SecDocumentClient`].

use super::{Filing, FilingSearch, FormType};
use crate::error::{ResearchError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

const SEC_API_QUERY_URL: &str = "https://api.sec-api.io";

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    filings: Vec<RawFiling>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFiling {
    #[serde(default)]
    form_type: Option<String>,
    #[serde(default)]
    filed_at: Option<String>,
    #[serde(default)]
    link_to_filing_details: Option<String>,
}

/// sec-api.io query API client
pub struct SecApiClient {
    client: Client,
    api_key: String,
}

impl SecApiClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }
}

/// Query body: newest single filing of `form` for `ticker`
pub fn filing_query(ticker: &str, form: FormType) -> Value {
    json!({
        "query": {
            "query_string": {
                "query": format!("ticker:{ticker} AND formType:\"{form}\"")
            }
        },
        "from": "0",
        "size": "1",
        "sort": [{ "filedAt": { "order": "desc" } }]
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn first_filing(response: QueryResponse, form: FormType) -> Option<Filing> {
    response.filings.into_iter().next().map(|raw| Filing {
        form_type: non_empty(raw.form_type).unwrap_or_else(|| form.to_string()),
        filed_at: non_empty(raw.filed_at),
        detail_url: non_empty(raw.link_to_filing_details),
    })
}

#[async_trait]
impl FilingSearch for SecApiClient {
    async fn latest_filing(&self, ticker: &str, form: FormType) -> Result<Option<Filing>> {
        debug!(ticker, form = %form, "Querying sec-api.io");

        let response = self
            .client
            .post(SEC_API_QUERY_URL)
            .query(&[("token", self.api_key.as_str())])
            .json(&filing_query(ticker, form))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ResearchError::Api(format!(
                "sec-api.io returned {status}: {}",
                research_utils::truncate_chars(body.trim(), 200)
            )));
        }

        let parsed: QueryResponse = response.json().await?;
        Ok(first_filing(parsed, form))
    }
}
