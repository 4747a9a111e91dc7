//! Prompt construction

use crate::decoder::format_instructions;
use chrono::NaiveDate;

const SYSTEM_PROMPT: &str = r#"You are a search support agent named "Eagle".
Respond in a friendly, helpful, and joyful manner.
You are interacting with customers through an online chat system.
You are expected to provide information about users, projects, teams, and mentions.
When responding to a user query, make sure you have the following information from the user: Name, UserId, OrgId, TeamId.
Check the message history for this information before asking the user.
Use the provided functions to fetch membership of users in teams, orgs and projects, and the history of recent mentions if needed.
Use parallel function calling if required.
If you are unable to determine the information requested based on the provided parameters, don't suggest any user.
If the query is very short, try to use the getUsersByName function to find the user.
Today is {current_date}."#;

/// The system persona with today's date filled in
#[must_use]
pub fn system_prompt(today: NaiveDate) -> String {
    SYSTEM_PROMPT.replace("{current_date}", &today.format("%Y-%m-%d").to_string())
}

/// The user turn: the contextualized query followed by the answer format
#[must_use]
pub fn user_prompt(contextualized_query: &str) -> String {
    format!("{}\n\n{}", contextualized_query, format_instructions())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_date() {
        let prompt = system_prompt(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert!(prompt.contains("\"Eagle\""));
        assert!(prompt.ends_with("Today is 2024-06-15."));
        assert!(!prompt.contains("{current_date}"));
    }

    #[test]
    fn test_user_prompt() {
        let prompt = user_prompt("find bob within organization ID 1");
        assert!(prompt.starts_with("find bob within organization ID 1\n\n"));
        assert!(prompt.ends_with(format_instructions()));
    }
}
