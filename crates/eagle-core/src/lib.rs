//! Eagle Core - Search Pipeline
//!
//! This crate turns a natural-language people query into a scoped list of
//! users:
//! - Contextualize: fold scope hints into the query text
//! - Prompt: the system persona and the user turn sent to the model
//! - Orchestrator: the model/tool round-trip loop
//! - Decoder: tolerant parsing of the model's final JSON answer
//! - Scope: re-validation of decoded users against the caller's scope
//! - Search: the `SearchService` entry point tying it all together

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod contextualize;
pub mod decoder;
pub mod error;
pub mod orchestrator;
pub mod prompt;
pub mod scope;
pub mod search;

pub use contextualize::contextualize;
pub use decoder::{decode, format_instructions};
pub use error::{format_error_for_cli, Error, Result, UserFriendlyError};
pub use orchestrator::{LoopOutcome, LoopState, Orchestrator, OrchestratorConfig, ToolCallRecord};
pub use search::{SearchRequest, SearchService, DEFAULT_LIMIT};
