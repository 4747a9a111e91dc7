//! Scope filtering
//!
//! The model's answer is advisory: users outside the caller's organization
//! are dropped here regardless of what the model returned.

use eagle_directory::User;
use tracing::warn;

/// Organization id callers send to mean "any organization"
pub const ANY_ORG: i64 = 0;

/// Keep only users in `org_id`, preserving order. `None` and [`ANY_ORG`] keep
/// everyone.
#[must_use]
pub fn filter(users: Vec<User>, org_id: Option<i64>) -> Vec<User> {
    let Some(org_id) = org_id.filter(|id| *id != ANY_ORG) else {
        return users;
    };

    let before = users.len();
    let kept: Vec<User> = users.into_iter().filter(|u| u.org_id == org_id).collect();

    if kept.len() != before {
        warn!(
            org_id = %org_id,
            dropped = before - kept.len(),
            "Model returned users outside the requested organization"
        );
    }

    kept
}

/// Filter to the organization, then truncate to `limit`
#[must_use]
pub fn apply(users: Vec<User>, org_id: Option<i64>, limit: usize) -> Vec<User> {
    let mut scoped = filter(users, org_id);
    scoped.truncate(limit);
    scoped
}
