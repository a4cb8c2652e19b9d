//! Ballroom partner service
//!
//! Serves the partner simulation over HTTP and records every danced
//! session in PostgreSQL when a database is configured.

mod commands;
mod config;
mod db;
mod error;
mod state;

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use db::PgSessionStore;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("ballroom_server=info,simulation=info,tower_http=info")
            }),
        )
        .init();

    let config = Config::from_env()?;

    let store = match &config.database_url {
        Some(url) => Some(PgSessionStore::connect(url, &config).await?),
        None => {
            warn!("DATABASE_URL not set; session records will not be stored");
            None
        }
    };

    if let Some(seed) = config.seed {
        info!("Using fixed simulation seed {}", seed);
    }

    let state = Arc::new(AppState {
        store,
        seed: config.seed,
    });
    let app = commands::create_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server is running on http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
