//! Builtins - Directory lookup tools
//!
//! This module provides the fixed tool set exposed to the model:
//! - User tools: getUserByUserId, getUsersByName
//! - Team tool: getTeamMembersByTeamName
//! - Project tool: getProjectMembersByProjectName
//! - Mention tool: getMentionsByUser
//!
//! Tool names are camelCase because the model sees them verbatim and the
//! prompts refer to them by these names.

mod mention;
mod project;
mod team;
mod user;

pub use mention::MentionsByUserTool;
pub use project::ProjectMembersTool;
pub use team::TeamMembersTool;
pub use user::{UserByIdTool, UsersByNameTool};

use crate::error::{Error, Result};
use crate::registry::ToolRegistry;
use eagle_directory::Directory;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// Register every directory tool
pub fn register_builtins(registry: &mut ToolRegistry, directory: Arc<Directory>) {
    registry.register(Arc::new(UserByIdTool::new(Arc::clone(&directory))));
    registry.register(Arc::new(UsersByNameTool::new(Arc::clone(&directory))));
    registry.register(Arc::new(TeamMembersTool::new(Arc::clone(&directory))));
    registry.register(Arc::new(ProjectMembersTool::new(Arc::clone(&directory))));
    registry.register(Arc::new(MentionsByUserTool::new(directory)));
}

/// Accept ids as JSON numbers or numeric strings; models emit both.
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Int(i64),
        Text(String),
    }

    match IdRepr::deserialize(deserializer)? {
        IdRepr::Int(id) => Ok(id),
        IdRepr::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected an integer id, got {:?}", text))),
    }
}

/// Serialize a lookup result into tool output
pub(crate) fn to_output<T: Serialize>(tool: &str, value: &T) -> Result<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|e| Error::Execution(format!("{} output: {}", tool, e)))
}

/// JSON schema for an object with one required integer id property
pub(crate) fn id_schema(property: &str, description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            property: {
                "type": "integer",
                "description": description
            }
        },
        "required": [property]
    })
}

/// JSON schema for an object with one required string property
pub(crate) fn text_schema(property: &str, description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            property: {
                "type": "string",
                "description": description
            }
        },
        "required": [property]
    })
}
