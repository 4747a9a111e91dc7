//! Error types for eagle-core
//!
//! This module provides the terminal failures of a search and their
//! user-facing wording.

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// The model call failed or timed out
    #[error("model transport error: {0}")]
    Transport(#[from] eagle_llm::Error),

    /// The model kept requesting tools past the round limit
    #[error("no final answer after {rounds} rounds")]
    RoundLimitExceeded {
        /// Rounds that were run
        rounds: usize,
    },

    /// The final answer could not be decoded into users
    #[error("could not decode model output: {reason}")]
    OutputDecoding {
        /// What was wrong with the text
        reason: String,
        /// The offending text, verbatim
        raw: String,
    },

    /// The caller cancelled the search
    #[error("search cancelled")]
    Cancelled,

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Whether the model backend itself is unavailable
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for user-friendly error messages
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get a suggestion for how to fix the error
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for Error {
    fn user_message(&self) -> String {
        match self {
            Error::Transport(eagle_llm::Error::Timeout(ms)) => {
                format!("⏳ The language model did not answer within {} ms.", ms)
            }
            Error::Transport(e) => format!("🤖 The language model is unavailable: {}", e),
            Error::RoundLimitExceeded { rounds } => format!(
                "🔁 The model was still looking things up after {} rounds.",
                rounds
            ),
            Error::OutputDecoding { reason, .. } => {
                format!("📋 The model's answer was not a user list: {}", reason)
            }
            Error::Cancelled => "✋ The search was cancelled.".to_string(),
            Error::Configuration(msg) => format!("⚙️ Configuration error: {}", msg),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Error::Transport(eagle_llm::Error::Timeout(_)) => Some(
                "💡 Raise llm.timeout_secs or use a smaller model.".to_string(),
            ),
            Error::Transport(_) => Some(
                "💡 Check that Ollama is running and llm.base_url points at it.".to_string(),
            ),
            Error::RoundLimitExceeded { .. } => Some(
                "💡 Rephrase the query more specifically or raise search.max_rounds.".to_string(),
            ),
            Error::OutputDecoding { .. } => {
                Some("💡 Try again; rerun with RUST_LOG=eagle_core=debug to see the raw answer.".to_string())
            }
            Error::Configuration(_) => {
                Some("💡 Check config/default.toml and EAGLE_* environment variables.".to_string())
            }
            Error::Cancelled => None,
        }
    }
}

/// Format an error for display in the CLI
pub fn format_error_for_cli(error: &Error) -> String {
    let mut output = error.user_message();
    output.push('\n');

    if let Some(suggestion) = error.suggestion() {
        output.push('\n');
        output.push_str(&suggestion);
        output.push('\n');
    }

    output
}
