//! The tool contract

use async_trait::async_trait;
use research_core::Result;
use serde_json::Value;

/// A named operation that turns JSON parameters into text
///
/// Upstream failures belong in the returned text. `Err` is reserved for
/// parameters the tool cannot interpret at all.
#[async_trait]
pub trait Tool: Send + Sync {
    async fn execute(&self, params: Value) -> Result<String>;

    /// Registry key, unique per [`ToolRegistry`](crate::ToolRegistry)
    fn name(&self) -> &str;

    /// One line shown in tool listings
    fn description(&self) -> &str;

    /// JSON Schema for `params`
    ///
    /// ```
    /// let schema = serde_json::json!({
    ///     "type": "object",
    ///     "properties": { "query": { "type": "string" } },
    ///     "required": ["query"]
    /// });
    /// assert_eq!(schema["required"][0], "query");
    /// ```
    fn input_schema(&self) -> Value;
}
