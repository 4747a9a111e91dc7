//! Eagle LLM - Language model transport abstraction
//!
//! This crate provides the model-facing side of Eagle:
//! - Message / tool types shared by every provider
//! - `ModelTurn`: a response is either tool calls or final text
//! - Router: the `LlmProvider` trait and a scripted `MockProvider`
//! - Ollama: local Ollama chat provider with tool calling

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod completion;
pub mod error;
pub mod message;
pub mod ollama;
pub mod router;
pub mod tools;

pub use error::{Error, Result};
pub use router::{
    CompletionRequest, LlmProvider, Message, MessageRole, MockProvider, ModelTurn, TokenUsage,
    ToolCall, ToolCompletionRequest, ToolCompletionResponse, ToolDefinition,
};

pub use ollama::{OllamaConfig, OllamaProvider};
