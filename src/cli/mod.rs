//! CLI module for Eagle
//!
//! Provides commands:
//! - `search`: Run one search and print the users as JSON
//! - `serve`: Start the HTTP server
//! - `tools`: List the tools exposed to the model

use clap::{Parser, Subcommand};

pub mod search;
pub mod tools;

/// Eagle people search CLI
#[derive(Parser, Debug)]
#[command(name = "eagle")]
#[command(about = "Natural-language people search over an organization directory")]
#[command(version)]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a search and print the matching users
    Search(search::SearchArgs),
    /// Start the HTTP server
    Serve,
    /// List the lookup tools the model can call
    Tools,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Search(args)) => search::run(args).await,
        Some(Commands::Serve) => crate::server::run().await,
        Some(Commands::Tools) => tools::run(),
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}
