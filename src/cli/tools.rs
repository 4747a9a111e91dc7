//! `eagle tools`

use anyhow::Result;
use chrono::Local;
use eagle_directory::seed;
use eagle_tools::{register_builtins, ToolCategory, ToolRegistry};
use std::sync::Arc;

/// Print every tool definition the model is offered, grouped by category
pub fn run() -> Result<()> {
    let directory = Arc::new(seed::demo_directory(Local::now().date_naive()));
    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry, directory);

    print!("{}", render(&registry));
    Ok(())
}

fn render(registry: &ToolRegistry) -> String {
    let mut out = String::new();
    for category in ToolCategory::ALL {
        let defs = registry.list_by_category(category);
        if defs.is_empty() {
            continue;
        }
        out.push_str(&format!("{}:\n", category));
        for def in defs {
            out.push_str(&format!("  {}\n", def.name));
            out.push_str(&format!("    {}\n", def.description));
            out.push_str(&format!("    {}\n", def.parameters));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_render_groups_by_category() {
        let directory = Arc::new(seed::demo_directory(
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        ));
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry, directory);

        let text = render(&registry);
        let user = text.find("user:\n").unwrap();
        let team = text.find("team:\n").unwrap();
        let project = text.find("project:\n").unwrap();
        let mention = text.find("mention:\n").unwrap();
        assert!(user < team && team < project && project < mention);

        let users_section = &text[user..team];
        assert!(users_section.contains("getUserByUserId"));
        assert!(users_section.contains("getUsersByName"));
        assert!(text[project..mention].contains("getProjectMembersByProjectName"));
    }
}
