//! Eagle Tools - Tool Registry and Execution Engine
//!
//! This crate provides the tool system the model drives:
//! - Registry: Tool registration, lookup and typed input decoding
//! - Runner: Tool execution with timeouts and parallel dispatch
//! - Builtins: The directory lookup tools

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builtins;
pub mod error;
pub mod registry;
pub mod runner;

pub use builtins::register_builtins;
pub use error::{Error, Result};
pub use registry::{parse_input, Tool, ToolCategory, ToolDefinition, ToolRegistry, ToolResult};
pub use runner::{ExecutionResult, RunnerConfig, ToolRunner};
