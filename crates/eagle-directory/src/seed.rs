//! Demo organization
//!
//! Five organizations (10, 20, 30, 40, 50), two named teams, two projects
//! and a short mention log. Mention dates are relative to `today` so the
//! "recently mentioned" questions keep working whenever the service runs.

use crate::directory::Directory;
use crate::model::{MentionHistory, Project, Team, User};
use chrono::{Days, NaiveDate};

/// Build the demo directory with mention dates relative to `today`
#[must_use]
pub fn demo_directory(today: NaiveDate) -> Directory {
    Directory::new(users(), teams(), projects(), mentions(today))
}

fn users() -> Vec<User> {
    [
        (1, "John Doe", "john@techhub.com", 1, 10),
        (2, "Jane Smith", "jane.s@techhub.com", 1, 10),
        (3, "Robert Brown", "robert.brown@techhub.com", 1, 10),
        (4, "Emily Davis", "emily.davis@techhub.com", 1, 10),
        (5, "Michael Wilson", "michael.wilson@techhub.com", 2, 10),
        (6, "Sarah Johnson", "s.johnson@techhub.com", 2, 10),
        (7, "David Lee", "david.lee@globalcorp.com", 3, 20),
        (8, "Lisa Chen", "lisa.chen@globalcorp.com", 3, 20),
        (9, "James Taylor", "j.taylor@globalcorp.com", 3, 20),
        (10, "Emma White", "emma.white@globalcorp.com", 3, 20),
        (11, "Daniel Kim", "daniel.kim@globalcorp.com", 4, 20),
        (12, "Olivia Brown", "olivia.br@globalcorp.com", 4, 20),
        (13, "William Garcia", "william.garcia@globalcorp.com", 4, 20),
        (14, "Sophia Martinez", "sophia.martinez@innovatesoft.net", 5, 30),
        (15, "Alexander Rodriguez", "alexander.rodriguez@innovatesoft.net", 5, 30),
        (16, "Isabella Lopez", "isabella.lopez@innovatesoft.net", 5, 30),
        (17, "Ethan Hernandez", "ethan.hernandez@innovatesoft.net", 5, 30),
        (18, "Mia Gonzalez", "mia.gonzalez@innovatesoft.net", 5, 30),
        (19, "Benjamin Perez", "benjamin.perez@innovatesoft.net", 5, 30),
        (20, "Ava Sanchez", "ava.sanchez@innovatesoft.org", 5, 30),
        (21, "Christopher Torres", "christopher.torres@datawave.org", 6, 40),
        (22, "Amelia Flores", "amelia.flores@datawave.org", 6, 40),
        (23, "Matthew Ramirez", "matthew@datawave.org", 6, 40),
        (24, "Evelyn Rivera", "evelyn@datawave.org", 6, 40),
        (25, "Andrew Morales", "andrew.morales@datawave.org", 6, 40),
        (26, "Charlotte Ortiz", "charlotte.ortiz@nexustech.io", 7, 50),
        (27, "Joseph Cruz", "joseph.cruz@nexustech.io", 7, 50),
        (28, "Abigail Reyes", "abigail.rey@nexustech.io", 7, 50),
        (29, "Ryan Phillips", "ryan@nexustech.io", 7, 50),
        (30, "Elizabeth Campbell", "elizabeth.cam@nexustech.io", 7, 50),
    ]
    .into_iter()
    .map(|(id, name, email, team, org)| User::new(id, name, email, team, org))
    .collect()
}

fn teams() -> Vec<Team> {
    vec![Team::new(1, "Alpha"), Team::new(2, "Beta")]
}

fn projects() -> Vec<Project> {
    vec![
        Project::new("Mars", vec![3, 1, 2]),
        Project::new("Eagle Eye", vec![4, 5]),
    ]
}

fn mentions(today: NaiveDate) -> Vec<MentionHistory> {
    let days_ago = |n: u64| today.checked_sub_days(Days::new(n)).unwrap_or(today);
    vec![
        MentionHistory::new(1, 2, days_ago(1)),
        MentionHistory::new(1, 3, days_ago(2)),
        MentionHistory::new(1, 5, days_ago(2)),
        MentionHistory::new(2, 5, days_ago(1)),
        MentionHistory::new(2, 6, days_ago(14)),
        MentionHistory::new(26, 26, days_ago(2)),
        MentionHistory::new(26, 27, days_ago(2)),
        MentionHistory::new(26, 28, days_ago(2)),
    ]
}
