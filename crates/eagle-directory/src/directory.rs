//! Directory - read-only lookups over the organization
//!
//! The directory is built once at startup and shared behind an `Arc`. It
//! exposes no mutation after construction, so concurrent lookups need no
//! locking.

use crate::model::{MentionHistory, Project, Team, User};
use tracing::debug;

/// Immutable collection of users, teams, projects and mentions
#[derive(Debug, Clone, Default)]
pub struct Directory {
    users: Vec<User>,
    teams: Vec<Team>,
    projects: Vec<Project>,
    mentions: Vec<MentionHistory>,
}

impl Directory {
    /// Build a directory from its records.
    ///
    /// Order is preserved: lookups that return several records return them
    /// in the order they were supplied here.
    #[must_use]
    pub fn new(
        users: Vec<User>,
        teams: Vec<Team>,
        projects: Vec<Project>,
        mentions: Vec<MentionHistory>,
    ) -> Self {
        Self {
            users,
            teams,
            projects,
            mentions,
        }
    }

    /// All users
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// All teams
    #[must_use]
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// All projects
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// All mention entries
    #[must_use]
    pub fn mentions(&self) -> &[MentionHistory] {
        &self.mentions
    }

    /// Look up a user by id
    #[must_use]
    pub fn user_by_id(&self, user_id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.user_id == user_id)
    }

    /// Users whose name or email contains `name`, ignoring case
    #[must_use]
    pub fn users_by_name(&self, name: &str) -> Vec<User> {
        let needle = name.to_lowercase();
        self.users
            .iter()
            .filter(|u| u.matches_lowercase(&needle))
            .cloned()
            .collect()
    }

    /// Users belonging to the given team id
    #[must_use]
    pub fn users_by_team_id(&self, team_id: i64) -> Vec<User> {
        self.users
            .iter()
            .filter(|u| u.team_id == team_id)
            .cloned()
            .collect()
    }

    /// Members of every project whose name contains `project_name`, ignoring
    /// case.
    ///
    /// Results from several matching projects are concatenated in project
    /// order. Member ids with no directory entry are skipped.
    #[must_use]
    pub fn project_members_by_name(&self, project_name: &str) -> Vec<User> {
        let needle = project_name.to_lowercase();
        self.projects
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .flat_map(|p| p.member_user_ids.iter())
            .filter_map(|id| {
                let user = self.user_by_id(*id);
                if user.is_none() {
                    debug!(user_id = %id, "Project member has no directory entry");
                }
                user.cloned()
            })
            .collect()
    }

    /// Members of every team whose name contains `team_name`, ignoring case
    #[must_use]
    pub fn team_members_by_name(&self, team_name: &str) -> Vec<User> {
        let needle = team_name.to_lowercase();
        self.teams
            .iter()
            .filter(|t| t.name.to_lowercase().contains(&needle))
            .flat_map(|t| self.users_by_team_id(t.team_id))
            .collect()
    }

    /// Mentions written by the given user
    #[must_use]
    pub fn mentions_by_user(&self, user_id: i64) -> Vec<MentionHistory> {
        self.mentions
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect()
    }
}
