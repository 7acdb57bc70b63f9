//! Shared handler state

use research_stock::{ResearchConfig, StockResearcher};
use std::sync::Arc;

/// State cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub researcher: Arc<StockResearcher>,
}

impl AppState {
    pub fn new(researcher: StockResearcher) -> Self {
        Self {
            researcher: Arc::new(researcher),
        }
    }

    /// State backed by the production clients
    pub fn from_config(config: &ResearchConfig) -> research_stock::Result<Self> {
        Ok(Self::new(StockResearcher::new(config)?))
    }

    pub fn default_ticker(&self) -> &str {
        self.researcher.default_ticker()
    }
}
