//! Configuration for stock research operations
//!
//! A single [`ResearchConfig`] value is built once (from the environment in the
//! binaries, from a builder in tests) and handed to every component.

use crate::error::{ResearchError, Result};
use research_utils::{EnvSource, ProcessEnv};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_XAI_BASE_URL: &str = "https://api.x.ai/v1";
pub const DEFAULT_XAI_MODEL: &str = "grok-2-latest";
pub const DEFAULT_MAX_TOKENS: usize = 450;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_TICKER: &str = "AMZN";
pub const DEFAULT_SEC_USER_AGENT: &str = "stock-analysis-research contact@example.com";

/// Chat-completion backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Groq (preferred when its key is set)
    Groq,
    /// xAI
    Xai,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "groq",
            ProviderKind::Xai => "xai",
        }
    }
}

/// Credentials and sampling settings for the report LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub groq_api_key: Option<String>,
    pub groq_base_url: String,
    pub groq_model: String,
    pub xai_api_key: Option<String>,
    pub xai_base_url: String,
    pub xai_model: String,
    pub max_tokens: usize,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            groq_api_key: None,
            groq_base_url: DEFAULT_GROQ_BASE_URL.to_string(),
            groq_model: DEFAULT_GROQ_MODEL.to_string(),
            xai_api_key: None,
            xai_base_url: DEFAULT_XAI_BASE_URL.to_string(),
            xai_model: DEFAULT_XAI_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Provider chosen for one report
#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    pub provider: ProviderKind,
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
}

impl LlmConfig {
    /// Pick the backend: Groq first, then xAI.
    ///
    /// Having neither key is fatal; no report can be produced.
    pub fn select(&self) -> Result<LlmSettings> {
        let (provider, api_key, base_url, model) = if let Some(key) = &self.groq_api_key {
            (ProviderKind::Groq, key, &self.groq_base_url, &self.groq_model)
        } else if let Some(key) = &self.xai_api_key {
            (ProviderKind::Xai, key, &self.xai_base_url, &self.xai_model)
        } else {
            return Err(ResearchError::Configuration(
                "Set GROQ_API_KEY or XAI_API_KEY.".to_string(),
            ));
        };

        Ok(LlmSettings {
            provider,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.clone(),
            model: model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        })
    }
}

/// Per-endpoint request timeouts
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Timeouts {
    pub news: Duration,
    pub filing_search: Duration,
    pub filing_page: Duration,
    pub search_probe: Duration,
    pub search_query: Duration,
    pub instant_answer: Duration,
    pub web_page: Duration,
    pub llm: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            news: Duration::from_secs(20),
            filing_search: Duration::from_secs(30),
            filing_page: Duration::from_secs(30),
            search_probe: Duration::from_secs(12),
            search_query: Duration::from_secs(20),
            instant_answer: Duration::from_secs(20),
            web_page: Duration::from_secs(20),
            llm: Duration::from_secs(90),
        }
    }
}

/// Configuration for stock research operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchConfig {
    /// Report LLM settings
    pub llm: LlmConfig,

    /// sec-api.io key; filing lookups are skipped without it
    pub sec_api_key: Option<String>,

    /// User-Agent sent to www.sec.gov (must carry contact details)
    pub sec_user_agent: String,

    /// Opt-in for the keyed search provider
    pub serper_enabled: bool,

    /// Serper key
    pub serper_api_key: Option<String>,

    /// Ticker used when a request does not name one
    pub default_ticker: String,

    /// Request timeouts
    pub timeouts: Timeouts,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            sec_api_key: None,
            sec_user_agent: DEFAULT_SEC_USER_AGENT.to_string(),
            serper_enabled: false,
            serper_api_key: None,
            default_ticker: DEFAULT_TICKER.to_string(),
            timeouts: Timeouts::default(),
        }
    }
}

impl ResearchConfig {
    /// Create a new configuration builder
    pub fn builder() -> ResearchConfigBuilder {
        ResearchConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_source(&ProcessEnv)
    }

    /// Load configuration from any variable source
    pub fn from_source(env: &impl EnvSource) -> Result<Self> {
        let defaults = LlmConfig::default();
        let llm = LlmConfig {
            groq_api_key: env.string("GROQ_API_KEY"),
            groq_base_url: trim_url(env.string_or("GROQ_BASE_URL", &defaults.groq_base_url)),
            groq_model: env.string_or("MODEL", &defaults.groq_model),
            xai_api_key: env.string("XAI_API_KEY"),
            xai_base_url: trim_url(env.string_or("XAI_BASE_URL", &defaults.xai_base_url)),
            xai_model: env.string_or("XAI_MODEL", &defaults.xai_model),
            max_tokens: env.parse_or("MAX_TOKENS", defaults.max_tokens)?,
            temperature: env.parse_or("TEMPERATURE", defaults.temperature)?,
        };

        Ok(Self {
            llm,
            sec_api_key: env.string("SEC_API_API_KEY"),
            sec_user_agent: env.string_or("SEC_USER_AGENT", DEFAULT_SEC_USER_AGENT),
            serper_enabled: env.flag("USE_SERPER"),
            serper_api_key: env.string("SERPER_API_KEY"),
            default_ticker: env.string_or("COMPANY_STOCK", DEFAULT_TICKER),
            timeouts: Timeouts::default(),
        })
    }

    /// Serper key if it looks usable (`KEY` is the placeholder from sample env files)
    pub fn usable_serper_key(&self) -> Option<&str> {
        self.serper_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && !k.eq_ignore_ascii_case("KEY"))
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Builder for ResearchConfig
#[derive(Debug, Default)]
pub struct ResearchConfigBuilder {
    config: ResearchConfig,
}

impl ResearchConfigBuilder {
    /// Set the Groq key
    pub fn groq_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.llm.groq_api_key = Some(key.into());
        self
    }

    /// Set the Groq base URL
    pub fn groq_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.llm.groq_base_url = trim_url(url.into());
        self
    }

    /// Set the Groq model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.llm.groq_model = model.into();
        self
    }

    /// Set the xAI key
    pub fn xai_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.llm.xai_api_key = Some(key.into());
        self
    }

    /// Set the xAI model
    pub fn xai_model(mut self, model: impl Into<String>) -> Self {
        self.config.llm.xai_model = model.into();
        self
    }

    /// Set the completion token limit
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.llm.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.llm.temperature = temperature;
        self
    }

    /// Set the sec-api.io key
    pub fn sec_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.sec_api_key = Some(key.into());
        self
    }

    /// Set the SEC user agent
    pub fn sec_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.sec_user_agent = agent.into();
        self
    }

    /// Opt in to Serper with the given key
    pub fn serper(mut self, key: impl Into<String>) -> Self {
        self.config.serper_enabled = true;
        self.config.serper_api_key = Some(key.into());
        self
    }

    /// Set the default ticker
    pub fn default_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.config.default_ticker = ticker.into();
        self
    }

    /// Set request timeouts
    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.config.timeouts = timeouts;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ResearchConfig {
        self.config
    }
}
