//! User lookup tools
//!
//! `getUserByUserId` resolves one user; `getUsersByName` matches a fragment
//! against names and emails.

use super::{id_schema, lenient_id, text_schema, to_output};
use crate::error::Result;
use crate::registry::{parse_input, Tool, ToolCategory, ToolDefinition, ToolResult};
use eagle_directory::Directory;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserIdInput {
    #[serde(deserialize_with = "lenient_id")]
    user_id: i64,
}

#[derive(Debug, Deserialize)]
struct NameInput {
    name: String,
}

/// Look up a single user by id
pub struct UserByIdTool {
    definition: ToolDefinition,
    directory: Arc<Directory>,
}

impl UserByIdTool {
    /// Create the tool over a directory
    #[must_use]
    pub fn new(directory: Arc<Directory>) -> Self {
        let definition = ToolDefinition::new("getUserByUserId", "Get user by userId")
            .with_parameters(id_schema("userId", "Numeric id of the user"))
            .with_category(ToolCategory::User);

        Self {
            definition,
            directory,
        }
    }
}

#[async_trait::async_trait]
impl Tool for UserByIdTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();
        let params: UserIdInput = parse_input(&self.definition.name, input)?;
        debug!(user_id = %params.user_id, "Calling getUserByUserId");

        let user = self.directory.user_by_id(params.user_id);
        let output = to_output(&self.definition.name, &user)?;

        Ok(ToolResult::success(output, start.elapsed().as_millis() as u64))
    }
}

/// Find users whose name or email contains a fragment
pub struct UsersByNameTool {
    definition: ToolDefinition,
    directory: Arc<Directory>,
}

impl UsersByNameTool {
    /// Create the tool over a directory
    #[must_use]
    pub fn new(directory: Arc<Directory>) -> Self {
        let definition = ToolDefinition::new(
            "getUsersByName",
            "Get users by name. Matches any part of the user's name or email, ignoring case",
        )
        .with_parameters(text_schema("name", "Name or email fragment to search for"))
        .with_category(ToolCategory::User);

        Self {
            definition,
            directory,
        }
    }
}

#[async_trait::async_trait]
impl Tool for UsersByNameTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();
        let params: NameInput = parse_input(&self.definition.name, input)?;
        debug!(name = %params.name, "Calling getUsersByName");

        let users = self.directory.users_by_name(&params.name);
        let output = to_output(&self.definition.name, &users)?;

        Ok(ToolResult::success(output, start.elapsed().as_millis() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{directory, ids};
    use super::*;
    use crate::error::Error;

    #[tokio::test]
    async fn test_user_by_id() {
        let tool = UserByIdTool::new(directory());
        let result = tool.execute(serde_json::json!({"userId": 3})).await.unwrap();

        assert!(result.success);
        assert_eq!(result.output["name"], "Robert Brown");
        assert_eq!(result.output["orgId"], 10);
    }

    #[tokio::test]
    async fn test_user_by_id_string_id() {
        let tool = UserByIdTool::new(directory());
        let result = tool.execute(serde_json::json!({"userId": "7"})).await.unwrap();
        assert_eq!(result.output["name"], "David Lee");
    }

    #[tokio::test]
    async fn test_user_by_id_absent() {
        let tool = UserByIdTool::new(directory());
        let result = tool.execute(serde_json::json!({"userId": 404})).await.unwrap();
        assert!(result.success);
        assert!(result.output.is_null());
    }

    #[tokio::test]
    async fn test_user_by_id_bad_arguments() {
        let tool = UserByIdTool::new(directory());
        let err = tool
            .execute(serde_json::json!({"id": 3}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(msg) if msg.contains("getUserByUserId")));
    }

    #[tokio::test]
    async fn test_users_by_name_matches_name_or_email() {
        let tool = UsersByNameTool::new(directory());
        let result = tool.execute(serde_json::json!({"name": "john"})).await.unwrap();

        // "John Doe" and "Sarah Johnson" both match by name
        assert_eq!(ids(&result.output), vec![1, 6]);
    }

    #[tokio::test]
    async fn test_users_by_name_matches_email_only() {
        let tool = UsersByNameTool::new(directory());
        let result = tool
            .execute(serde_json::json!({"name": "s.johnson"}))
            .await
            .unwrap();
        assert_eq!(ids(&result.output), vec![6]);

        let result = tool.execute(serde_json::json!({"name": "TechHub"})).await.unwrap();
        assert_eq!(ids(&result.output), vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn test_users_by_name_no_match() {
        let tool = UsersByNameTool::new(directory());
        let result = tool.execute(serde_json::json!({"name": "zzz"})).await.unwrap();
        assert!(ids(&result.output).is_empty());
    }
}
