//! Chat-completion client for report generation
//!
//! [`LLMProvider`] is the seam the research pipeline calls. The `openai`
//! feature adds [`providers::OpenAIProvider`], which speaks the
//! `/chat/completions` contract that Groq and xAI both expose.

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;

pub use completion::{
    CompletionRequest, CompletionRequestBuilder, CompletionResponse, DEFAULT_MAX_TOKENS, StopReason,
    TokenUsage,
};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;

#[cfg(feature = "openai")]
pub mod providers;
