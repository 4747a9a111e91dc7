//! Mention history tool

use super::{id_schema, lenient_id, to_output};
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

/// List the mentions a user has written
pub struct MentionsByUserTool {
    definition: ToolDefinition,
    directory: Arc<Directory>,
}

impl MentionsByUserTool {
    /// Create the tool over a directory
    #[must_use]
    pub fn new(directory: Arc<Directory>) -> Self {
        let definition = ToolDefinition::new(
            "getMentionsByUser",
            "Get all MentionHistory that the given user mentions so far",
        )
        .with_parameters(id_schema("userId", "Numeric id of the user who wrote the mentions"))
        .with_category(ToolCategory::Mention);

        Self {
            definition,
            directory,
        }
    }
}

#[async_trait::async_trait]
impl Tool for MentionsByUserTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();
        let params: UserIdInput = parse_input(&self.definition.name, input)?;
        debug!(user_id = %params.user_id, "Calling getMentionsByUser");

        let mentions = self.directory.mentions_by_user(params.user_id);
        let output = to_output(&self.definition.name, &mentions)?;

        Ok(ToolResult::success(output, start.elapsed().as_millis() as u64))
    }
}
