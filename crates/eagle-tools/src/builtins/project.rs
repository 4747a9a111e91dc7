//! Project membership tool

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
struct ProjectNameInput {
    project_name: String,
}

/// List the members of every project whose name contains a fragment
pub struct ProjectMembersTool {
    definition: ToolDefinition,
    directory: Arc<Directory>,
}

impl ProjectMembersTool {
    /// Create the tool over a directory
    #[must_use]
    pub fn new(directory: Arc<Directory>) -> Self {
        let definition = ToolDefinition::new(
            "getProjectMembersByProjectName",
            "Get project members by project name",
        )
        .with_parameters(text_schema("projectName", "Project name or part of it"))
        .with_category(ToolCategory::Project);

        Self {
            definition,
            directory,
        }
    }
}

#[async_trait::async_trait]
impl Tool for ProjectMembersTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn execute(&self, input: serde_json::Value) -> Result<ToolResult> {
        let start = Instant::now();
        let params: ProjectNameInput = parse_input(&self.definition.name, input)?;
        debug!(project_name = %params.project_name, "Calling getProjectMembersByProjectName");

        let users = self.directory.project_members_by_name(&params.project_name);
        let output = to_output(&self.definition.name, &users)?;

        Ok(ToolResult::success(output, start.elapsed().as_millis() as u64))
    }
}
