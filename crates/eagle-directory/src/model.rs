//! Directory records
//!
//! All records serialize with camelCase field names because they are shown to
//! the model verbatim and the model is asked to echo users back in the same
//! shape.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A person in the organization directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Directory-wide identity key
    pub user_id: i64,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Team the user belongs to
    pub team_id: i64,
    /// Organization the user belongs to
    pub org_id: i64,
}

impl User {
    /// Create a new user record
    #[must_use]
    pub fn new(
        user_id: i64,
        name: impl Into<String>,
        email: impl Into<String>,
        team_id: i64,
        org_id: i64,
    ) -> Self {
        Self {
            user_id,
            name: name.into(),
            email: email.into(),
            team_id,
            org_id,
        }
    }

    /// Case-insensitive substring match on name or email.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.email.to_lowercase().contains(needle)
    }
}

/// A team; members are the users whose `team_id` equals `team_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Team identifier
    pub team_id: i64,
    /// Team name
    pub name: String,
}

impl Team {
    /// Create a new team
    #[must_use]
    pub fn new(team_id: i64, name: impl Into<String>) -> Self {
        Self {
            team_id,
            name: name.into(),
        }
    }
}

/// A project and its ordered member list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project name
    pub name: String,
    /// Member user ids, in declaration order
    pub member_user_ids: Vec<i64>,
}

impl Project {
    /// Create a new project
    #[must_use]
    pub fn new(name: impl Into<String>, member_user_ids: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            member_user_ids,
        }
    }
}

/// One "user A mentioned user B" log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionHistory {
    /// The user who wrote the mention
    pub user_id: i64,
    /// The user who was mentioned
    pub mentioned_user_id: i64,
    /// Day the mention happened
    pub occurred_on: NaiveDate,
}

impl MentionHistory {
    /// Create a new mention entry
    #[must_use]
    pub fn new(user_id: i64, mentioned_user_id: i64, occurred_on: NaiveDate) -> Self {
        Self {
            user_id,
            mentioned_user_id,
            occurred_on,
        }
    }
}
