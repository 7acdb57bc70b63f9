//! OpenAI-compatible chat-completions provider
//!
//! Groq and xAI both accept the OpenAI request shape. Only the base URL, key
//! and label differ between them.
//!
//! # Example
//!
//! ```no_run
//! use research_llm::{CompletionRequest, LLMProvider};
//! use research_llm::providers::{OpenAIConfig, OpenAIProvider};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = OpenAIConfig::new("gsk_...")
//!         .with_api_base("https://api.groq.com/openai/v1")
//!         .with_name("groq")
//!         .with_timeout(Duration::from_secs(90));
//!     let provider = OpenAIProvider::with_config(config)?;
//!
//!     let request = CompletionRequest::builder("llama-3.1-8b-instant")
//!         .user("Hello!")
//!         .max_tokens(100)
//!         .build();
//!
//!     let response = provider.complete(request).await?;
//!     println!("{}", response.message.text());
//!     Ok(())
//! }
//! ```

use crate::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, Result, StopReason,
    TokenUsage,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// Where and how to reach a `/chat/completions` backend
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    /// No trailing slash, e.g. `https://api.groq.com/openai/v1`
    pub api_base: String,
    pub timeout: Duration,
    /// Reported by [`LLMProvider::name`]
    pub name: String,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            name: "openai".to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into();
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// Whole-request timeout, connect included
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Chat-completions client for Groq, xAI or OpenAI itself
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    pub fn with_config(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Provider for api.openai.com with default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(OpenAIConfig::new(api_key))
    }

    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    #[instrument(skip(self, request), fields(provider = %self.config.name, model = %request.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let url = format!("{}/chat/completions", self.config.api_base);
        debug!(%url, "Sending chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&ChatRequest::from(&request))
            .send()
            .await?;

        let status = response.status();
        let body = if status.is_success() {
            response.text().await?
        } else {
            response.text().await.unwrap_or_default()
        };
        parse_completion(status.as_u16(), body)
    }

    fn name(&self) -> &str {
        &self.config.name
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a CompletionRequest> for ChatRequest<'a> {
    /// The system prompt leads the messages array
    fn from(request: &'a CompletionRequest) -> Self {
        let system = request.system.as_deref().map(|content| ChatMessage {
            role: "system",
            content,
        });
        let turns = request.messages.iter().map(|m| ChatMessage {
            role: m.role.as_str(),
            content: m.text(),
        });
        Self {
            model: &request.model,
            messages: system.into_iter().chain(turns).collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChatChoice {
    message: Option<ChatReply>,
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChatUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

/// Turn a status and body into a completion or the matching error
fn parse_completion(status: u16, body: String) -> Result<CompletionResponse> {
    if !(200..300).contains(&status) {
        return Err(LLMError::from_status(status, body));
    }
    let payload: ChatResponse =
        serde_json::from_str(&body).map_err(|e| LLMError::Decode(e.to_string()))?;
    Ok(payload.into_completion())
}

impl ChatResponse {
    /// A missing choice or null content becomes an empty reply; the caller
    /// decides what an empty completion means.
    fn into_completion(self) -> CompletionResponse {
        let choice = self.choices.into_iter().next().unwrap_or_default();
        let stop_reason = choice
            .finish_reason
            .as_deref()
            .map_or(StopReason::EndTurn, StopReason::from_finish_reason);
        let content = choice.message.and_then(|m| m.content).unwrap_or_default();
        let usage = self
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        debug!(?stop_reason, tokens = usage.total(), "Received completion");
        CompletionResponse {
            message: Message::assistant(content),
            stop_reason,
            usage,
        }
    }
}
