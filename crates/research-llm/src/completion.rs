//! Chat completion request and response types

use crate::{Message, Role};
use serde::{Deserialize, Serialize};

/// Token cap applied when a caller never sets one
pub const DEFAULT_MAX_TOKENS: usize = 1024;

/// One chat completion call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier (provider-specific)
    pub model: String,

    /// Instructions sent ahead of the conversation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// User and assistant turns, oldest first
    pub messages: Vec<Message>,

    pub max_tokens: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    pub fn builder(model: impl Into<String>) -> CompletionRequestBuilder {
        CompletionRequestBuilder {
            request: Self {
                model: model.into(),
                system: None,
                messages: Vec::new(),
                max_tokens: DEFAULT_MAX_TOKENS,
                temperature: None,
            },
        }
    }

    /// Text of the most recent user turn, or `""` when there is none
    pub fn prompt(&self) -> &str {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map_or("", Message::text)
    }
}

/// Builder for [`CompletionRequest`]
#[derive(Debug, Clone)]
pub struct CompletionRequestBuilder {
    request: CompletionRequest,
}

impl CompletionRequestBuilder {
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.request.system = Some(system.into());
        self
    }

    /// Append a user turn
    pub fn user(mut self, text: impl Into<String>) -> Self {
        self.request.messages.push(Message::user(text));
        self
    }

    /// Append any message
    pub fn add_message(mut self, message: Message) -> Self {
        self.request.messages.push(message);
        self
    }

    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.request.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.request.temperature = Some(temperature);
        self
    }

    pub fn build(self) -> CompletionRequest {
        self.request
    }
}

/// Model output for one request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Assistant reply; empty when the backend sent no content
    pub message: Message,

    pub stop_reason: StopReason,

    /// Zero when the backend omits usage
    pub usage: TokenUsage,
}

/// Why generation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    ContentFilter,
}

impl StopReason {
    /// Map an OpenAI-style `finish_reason`; unknown values count as a normal end
    pub fn from_finish_reason(reason: &str) -> Self {
        match reason {
            "length" => Self::MaxTokens,
            "content_filter" => Self::ContentFilter,
            _ => Self::EndTurn,
        }
    }
}

/// Token accounting reported by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
}

impl TokenUsage {
    pub fn total(&self) -> usize {
        self.prompt_tokens + self.completion_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let request = CompletionRequest::builder("llama-3.1-8b-instant")
            .system("You are a pragmatic stock analyst")
            .user("Analyze ticker AAPL")
            .max_tokens(450)
            .temperature(0.2)
            .build();

        assert_eq!(request.model, "llama-3.1-8b-instant");
        assert_eq!(request.system.as_deref(), Some("You are a pragmatic stock analyst"));
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.max_tokens, 450);
        assert_eq!(request.temperature, Some(0.2));
    }

    #[test]
    fn test_defaults() {
        let request = CompletionRequest::builder("grok-2-latest").build();
        assert_eq!(request.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(request.temperature, None);
        assert_eq!(request.prompt(), "");
    }

    #[test]
    fn test_prompt_is_latest_user_turn() {
        let request = CompletionRequest::builder("m")
            .user("first")
            .add_message(Message::assistant("reply"))
            .user("second")
            .build();
        assert_eq!(request.prompt(), "second");
    }

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(StopReason::from_finish_reason("stop"), StopReason::EndTurn);
        assert_eq!(StopReason::from_finish_reason("length"), StopReason::MaxTokens);
        assert_eq!(
            StopReason::from_finish_reason("content_filter"),
            StopReason::ContentFilter
        );
        assert_eq!(StopReason::from_finish_reason("tool_calls"), StopReason::EndTurn);
    }

    #[test]
    fn test_token_usage_total() {
        let usage = TokenUsage {
            prompt_tokens: 100,
            completion_tokens: 50,
        };
        assert_eq!(usage.total(), 150);
        assert_eq!(TokenUsage::default().total(), 0);
    }
}
