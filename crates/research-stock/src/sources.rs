//! The set of upstream clients one research run talks to

use std::sync::Arc;

use crate::api::{
    DocumentFetcher, DuckDuckGoClient, FilingSearch, GoogleNewsClient, InstantAnswer, NewsFeed,
    SearchProvider, SecApiClient, SecDocumentClient, SerperClient, WebPageClient,
};
use crate::config::ResearchConfig;
use crate::error::Result;

/// Upstream clients behind their seams
///
/// Optional members are `None` when configuration rules the service out, so
/// callers never reach it.
#[derive(Clone)]
pub struct Sources {
    pub news: Arc<dyn NewsFeed>,
    pub filings: Option<Arc<dyn FilingSearch>>,
    pub sec_documents: Arc<dyn DocumentFetcher>,
    pub web_pages: Arc<dyn DocumentFetcher>,
    pub search: Option<Arc<dyn SearchProvider>>,
    pub instant: Arc<dyn InstantAnswer>,
}

impl Sources {
    /// Build the production `reqwest` clients. Nothing is contacted here.
    pub fn from_config(config: &ResearchConfig) -> Result<Self> {
        let timeouts = &config.timeouts;

        let filings: Option<Arc<dyn FilingSearch>> = match config.sec_api_key.as_deref() {
            Some(key) => Some(Arc::new(SecApiClient::new(key, timeouts.filing_search)?)),
            None => None,
        };

        let search: Option<Arc<dyn SearchProvider>> =
            match config.usable_serper_key().filter(|_| config.serper_enabled) {
                Some(key) => Some(Arc::new(SerperClient::new(
                    key,
                    timeouts.search_probe,
                    timeouts.search_query,
                )?)),
                None => None,
            };

        Ok(Self {
            news: Arc::new(GoogleNewsClient::new(timeouts.news)?),
            filings,
            sec_documents: Arc::new(SecDocumentClient::new(
                config.sec_user_agent.clone(),
                timeouts.filing_page,
            )?),
            web_pages: Arc::new(WebPageClient::new(timeouts.web_page)?),
            search,
            instant: Arc::new(DuckDuckGoClient::new(timeouts.instant_answer)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_sources_follow_config() {
        let sources = Sources::from_config(&ResearchConfig::default()).unwrap();
        assert!(sources.filings.is_none());
        assert!(sources.search.is_none());

        let config = ResearchConfig::builder()
            .sec_api_key("sec")
            .serper("serper-key")
            .build();
        let sources = Sources::from_config(&config).unwrap();
        assert!(sources.filings.is_some());
        assert!(sources.search.is_some());
    }

    #[test]
    fn test_serper_needs_opt_in_and_real_key() {
        let mut config = ResearchConfig::builder().serper("KEY").build();
        assert!(Sources::from_config(&config).unwrap().search.is_none());

        config.serper_api_key = Some("real".to_string());
        config.serper_enabled = false;
        assert!(Sources::from_config(&config).unwrap().search.is_none());
    }
}
