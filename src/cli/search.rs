//! `eagle search`

use crate::server::{build_search_service, load_config};
use anyhow::{Context, Result};
use clap::Args;
use eagle_core::{format_error_for_cli, SearchRequest};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Arguments for a one-off search
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Natural-language query, e.g. "who is on the Mars project"
    pub query: String,

    /// Maximum number of users to print (default: search.default_limit)
    #[arg(long, short)]
    pub limit: Option<usize>,

    /// Restrict results to this organization
    #[arg(long)]
    pub org_id: Option<i64>,

    /// Team hint
    #[arg(long)]
    pub team_id: Option<i64>,

    /// User the query is relative to
    #[arg(long)]
    pub user_id: Option<i64>,
}

impl SearchArgs {
    fn into_request(self, default_limit: usize) -> SearchRequest {
        SearchRequest {
            query: self.query,
            limit: self.limit.unwrap_or(default_limit),
            org_id: self.org_id,
            team_id: self.team_id,
            user_id: self.user_id,
        }
    }
}

/// Run a search, printing the users as pretty JSON on stdout
pub async fn run(args: SearchArgs) -> Result<()> {
    let config = load_config().context("Failed to load configuration")?;
    let service = build_search_service(&config)?;
    let request = args.into_request(config.search.default_limit);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling search");
            on_interrupt.cancel();
        }
    });

    match service.search_with_cancel(&request, &cancel).await {
        Ok(users) => {
            let output =
                serde_json::to_string_pretty(&users).context("Failed to serialize users")?;
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format_error_for_cli(&e));
            Err(anyhow::Error::new(e).context("Search failed"))
        }
    }
}
