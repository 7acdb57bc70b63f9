//! Tool management and execution framework
//!
//! This crate provides the contract for research tools (news search, filing
//! search, web search, ...) and a registry to look them up by name.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::Tool;
