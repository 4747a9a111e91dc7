//! Orchestrator types
//!
//! Contains the loop's state, its outcome and the per-call records kept
//! for logging and diagnostics.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a session is in the model/tool exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopState {
    /// A model call is outstanding
    AwaitingModel,
    /// The model asked for tools; they are being run
    ToolCallPending,
    /// The model produced its final text
    FinalResponseReceived,
}

impl LoopState {
    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingModel => "awaiting_model",
            Self::ToolCallPending => "tool_call_pending",
            Self::FinalResponseReceived => "final_response_received",
        }
    }
}

impl std::fmt::Display for LoopState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Record of a tool call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRecord {
    /// Correlation id the model assigned
    pub call_id: String,
    /// Tool name
    pub tool_name: String,
    /// Decoded arguments (null when they were not valid JSON)
    pub input: serde_json::Value,
    /// Output sent back to the model
    pub output: serde_json::Value,
    /// Whether it succeeded
    pub success: bool,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Result of a converged loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopOutcome {
    /// Id used to correlate the loop's log lines
    pub session_id: Uuid,
    /// The model's final text, undecoded
    pub final_text: String,
    /// Model round trips made, including the final one
    pub rounds: usize,
    /// Tool calls made, in dispatch order
    pub tool_calls: Vec<ToolCallRecord>,
    /// Loop duration in milliseconds
    pub duration_ms: u64,
    /// Model that produced the final text
    pub model: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_state_display() {
        assert_eq!(LoopState::AwaitingModel.to_string(), "awaiting_model");
        assert_eq!(
            serde_json::to_value(LoopState::ToolCallPending).unwrap(),
            "tool_call_pending"
        );
    }
}
