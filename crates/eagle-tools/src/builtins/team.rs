//! Team membership tool

use super::{text_schema, to_output};
use crate::error::Result;
use crate::registry::{parse_input, Tool, ToolCategory, ToolDefinition, ToolResult};
use eagle_directory::Directory;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamNameInput {
    team_name: String,
}

/// List the members of every team whose name contains a fragment
pub struct TeamMembersTool {
    definition: ToolDefinition,
    directory: Arc<Directory>,
}

impl TeamMembersTool {
    /// Create the tool over a directory
    #[must_use]
    pub fn new(directory: Arc<Directory>) -> Self {
        let definition =
            ToolDefinition::new("getTeamMembersByTeamName", "Get team members by team name")
                .with_parameters(text_schema("teamName", "Team name or part of it"))
                .with_category(ToolCategory::Team);

        Self {
            definition,
            directory,
        }
    }
}

#[async_trait::async_trait]
impl Tool for TeamMembersTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();
        let params: TeamNameInput = parse_input(&self.definition.name, input)?;
        debug!(team_name = %params.team_name, "Calling getTeamMembersByTeamName");

        let users = self.directory.team_members_by_name(&params.team_name);
        let output = to_output(&self.definition.name, &users)?;

        Ok(ToolResult::success(output, start.elapsed().as_millis() as u64))
    }
}
