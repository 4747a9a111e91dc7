//! Router - LLM Provider abstraction
//!
//! This module defines the core trait for LLM providers and re-exports the
//! request/response types every provider speaks.
//!
//! # Module Structure
//!
//! - `provider`: LlmProvider trait definition
//! - `mock`: Scripted provider for testing

mod mock;
mod provider;

pub use crate::completion::{
    CompletionRequest, ModelTurn, TokenUsage, ToolCompletionRequest, ToolCompletionResponse,
};
pub use crate::message::{Message, MessageRole};
pub use crate::tools::{ToolCall, ToolDefinition};

pub use mock::MockProvider;
pub use provider::LlmProvider;
