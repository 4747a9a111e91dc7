//! Query contextualization
//!
//! Scope hints are folded into the query text in a fixed order
//! (organization, team, user) so identical inputs always produce the
//! same prompt.

/// Append a clause for every scope hint that is present
#[must_use]
pub fn contextualize(
    query: &str,
    org_id: Option<i64>,
    team_id: Option<i64>,
    user_id: Option<i64>,
) -> String {
    let mut text = String::from(query);

    if let Some(org_id) = org_id {
        text.push_str(&format!(" within organization ID {}", org_id));
    }
    if let Some(team_id) = team_id {
        text.push_str(&format!(" for team ID {}", team_id));
    }
    if let Some(user_id) = user_id {
        text.push_str(&format!(" relevant to user ID {}", user_id));
    }

    text
}
