//! Server module for Eagle
//!
//! Contains configuration, wiring and the HTTP run loop.
//!
//! # Module Structure
//!
//! - `config`: Configuration structures
//! - `loader`: Configuration loading from files and environment
//! - `providers`: Builds the search service from configuration
//! - `init`: HTTP server startup and graceful shutdown

pub mod config;
mod init;
mod loader;
mod providers;

pub use init::run;
pub use loader::load_config;
pub use providers::build_search_service;
