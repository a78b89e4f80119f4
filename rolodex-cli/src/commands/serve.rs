//! HTTP server command
//!
//! Opens the database, bootstraps the schema and serves until shutdown.

use anyhow::{Context, Result};
use clap::Parser;

use rolodex_server::db::{create_pool_with_options, schema};
use rolodex_server::run_server;

use crate::config::{RolodexConfig, ServerOverrides};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServerOverrides,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let settings = RolodexConfig::load()?.resolve(&args.overrides);

    tracing::info!(
        bind = %settings.bind,
        database = %settings.database_url,
        "Starting rolodex server"
    );

    let pool = create_pool_with_options(&settings.database_url, settings.max_connections)
        .await
        .with_context(|| format!("Failed to open database at {}", settings.database_url))?;

    schema::bootstrap(&pool)
        .await
        .context("Failed to bootstrap database schema")?;

    // Blocks until shutdown
    run_server(pool, settings.server_config())
        .await
        .context("Server error")?;

    Ok(())
}
