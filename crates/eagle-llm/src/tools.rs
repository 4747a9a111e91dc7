//! Tool types for LLM function calling
//!
//! This module defines the types used for LLM tool/function calling capabilities.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tool definition for function calling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON schema for parameters
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// A tool call requested by the LLM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique ID for this tool call
    pub id: String,
    /// Tool name
    pub name: String,
    /// Arguments as JSON string
    pub arguments: String,
}

impl ToolCall {
    /// Create a new tool call
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// Parse arguments as a typed value
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.arguments).map_err(|e| Error::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_definition() {
        let tool = ToolDefinition::new(
            "getUserByUserId",
            "Get user by userId",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "userId": {"type": "integer"}
                },
                "required": ["userId"]
            }),
        );

        assert_eq!(tool.name, "getUserByUserId");
        assert_eq!(tool.description, "Get user by userId");
    }

    #[test]
    fn test_tool_call_parse_arguments() {
        let tool_call = ToolCall::new("call_123", "getUsersByName", r#"{"name": "john"}"#);

        #[derive(Deserialize)]
        struct Args {
            name: String,
        }

        let args: Args = tool_call.parse_arguments().unwrap();
        assert_eq!(args.name, "john");
    }

    #[test]
    fn test_tool_call_parse_arguments_invalid() {
        let tool_call = ToolCall::new("call_1", "getUsersByName", "not json");
        let parsed: Result<serde_json::Value> = tool_call.parse_arguments();
        assert!(matches!(parsed, Err(Error::InvalidResponse(_))));
    }
}
