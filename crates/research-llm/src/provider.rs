//! Chat model seam

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// A chat-completion backend
///
/// The report generator only ever talks to this trait, so tests can swap in
/// a scripted model.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Label used in logs, e.g. `groq` or `xai`
    fn name(&self) -> &str;
}
