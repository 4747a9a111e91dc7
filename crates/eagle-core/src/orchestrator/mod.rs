//! Orchestrator - Model/tool round-trip loop
//!
//! The loop relays messages between the model and the tool registry until
//! the model produces final text, the round limit is hit or the caller
//! cancels.
//!
//! # Module Structure
//!
//! - `types`: Loop state, outcome and tool call records
//! - `config`: `OrchestratorConfig`
//! - `core`: `Orchestrator` struct and accessors
//! - `process`: The round loop
//! - `tool_execution`: Concurrent dispatch of one round's tool calls

mod config;
mod core;
mod process;
mod tool_execution;
mod types;

pub use config::OrchestratorConfig;
pub use core::Orchestrator;
pub use types::{LoopOutcome, LoopState, ToolCallRecord};
