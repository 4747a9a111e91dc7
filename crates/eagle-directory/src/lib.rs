//! Eagle Directory - Organization entity lookups
//!
//! This crate provides the read-only data the search pipeline resolves
//! queries against:
//! - Model: User, Team, Project and MentionHistory records
//! - Directory: exact and substring lookups over those records
//! - Seed: the demo organization loaded at startup

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod directory;
pub mod model;
pub mod seed;

pub use directory::Directory;
pub use model::{MentionHistory, Project, Team, User};
