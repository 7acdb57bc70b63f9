//! Markdown report generation
//!
//! Provider selection failing is fatal. Anything after that (prompt, network,
//! HTTP status, payload) degrades to a notice followed by the raw context, so
//! the caller always receives text.

use research_llm::providers::{OpenAIConfig, OpenAIProvider};
use research_llm::{CompletionRequest, LLMProvider};
use research_utils::truncate_chars;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::config::{LlmConfig, LlmSettings};
use crate::error::Result;
use crate::prompts::{REPORT_SYSTEM_PROMPT, report_user_prompt};

/// Substituted for an empty completion
pub const NO_CONTENT: &str = "No content returned by model.";

/// Raw context kept in a degraded report
pub const CONTEXT_PREVIEW_CHARS: usize = 5000;

/// Text returned when the model call fails
pub fn degraded_report(reason: &str, context: &str) -> String {
    format!(
        "LLM generation failed. Returning raw context.\n\nReason: {reason}\n\n{}",
        truncate_chars(context, CONTEXT_PREVIEW_CHARS)
    )
}

/// Sends research context to the selected chat model
#[derive(Clone)]
pub struct ReportGenerator {
    llm: LlmConfig,
    timeout: Duration,
    provider: Option<Arc<dyn LLMProvider>>,
}

impl ReportGenerator {
    pub fn new(llm: LlmConfig, timeout: Duration) -> Self {
        Self {
            llm,
            timeout,
            provider: None,
        }
    }

    /// Use `provider` instead of building an HTTP client from the selected settings
    pub fn with_provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Provider, model and sampling settings the next report would use
    pub fn settings(&self) -> Result<LlmSettings> {
        self.llm.select()
    }

    /// Report for `ticker`; only a configuration problem is an `Err`
    #[instrument(skip(self, context), fields(context_chars = context.chars().count()))]
    pub async fn generate(&self, ticker: &str, context: &str) -> Result<String> {
        let settings = self.settings()?;
        info!(provider = settings.provider.as_str(), model = %settings.model, "Generating report");

        match self.complete(&settings, ticker, context).await {
            Ok(report) => Ok(report),
            Err(e) => {
                warn!(error = %e, "Report generation failed, returning raw context");
                Ok(degraded_report(&e.to_string(), context))
            }
        }
    }

    fn provider_for(&self, settings: &LlmSettings) -> Result<Arc<dyn LLMProvider>> {
        if let Some(provider) = &self.provider {
            return Ok(provider.clone());
        }
        let config = OpenAIConfig::new(settings.api_key.clone())
            .with_api_base(settings.base_url.clone())
            .with_name(settings.provider.as_str())
            .with_timeout(self.timeout);
        Ok(Arc::new(OpenAIProvider::with_config(config)?))
    }

    async fn complete(&self, settings: &LlmSettings, ticker: &str, context: &str) -> Result<String> {
        let provider = self.provider_for(settings)?;
        let request = CompletionRequest::builder(settings.model.clone())
            .system(REPORT_SYSTEM_PROMPT)
            .user(report_user_prompt(ticker, context)?)
            .max_tokens(settings.max_tokens)
            .temperature(settings.temperature)
            .build();

        let response = provider.complete(request).await?;
        let content = response.message.text().trim();
        Ok(if content.is_empty() {
            NO_CONTENT.to_string()
        } else {
            content.to_string()
        })
    }
}
