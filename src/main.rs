// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use movies_search::app::{create_router, AppState, VERSION};
use movies_search::config::Settings;
use movies_search::services::db::MovieDb;
use movies_search::services::loader::MovieLoader;
use movies_search::services::search::{SearchClient, MOVIES_INDEX};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "movies-search", version = VERSION, about = "Movie search facade and index loader")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API facade
    Serve,
    /// One-shot migration of the SQLite movie data into the search index
    Load {
        /// Path to the SQLite database file (overrides MOVIES_DATABASE)
        #[arg(long)]
        database: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    match cli.command {
        Command::Serve => serve(settings).await,
        Command::Load { database } => load(settings, database).await,
    }
}

async fn serve(settings: Settings) -> Result<()> {
    let search_client = SearchClient::new(&settings.meilisearch_host, MOVIES_INDEX.to_string())
        .await?;

    // Refuse to start when the search engine is unreachable
    search_client.health_check().await.with_context(|| {
        format!(
            "Meilisearch host {} is unavailable",
            settings.meilisearch_host
        )
    })?;

    let state = AppState {
        search_client: Arc::new(search_client),
    };
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;

    info!(addr = %settings.bind_addr, version = VERSION, "movies-search listening");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn load(settings: Settings, database: Option<PathBuf>) -> Result<()> {
    let database = database.unwrap_or(settings.database_path);
    if !database.is_file() {
        bail!("SQLite database {} not found", database.display());
    }

    let db = MovieDb::connect(&database).await?;

    let search_client = SearchClient::new(&settings.meilisearch_host, MOVIES_INDEX.to_string())
        .await?;
    search_client.health_check().await.with_context(|| {
        format!(
            "Meilisearch host {} is unavailable",
            settings.meilisearch_host
        )
    })?;

    let loader = MovieLoader::new(db, search_client);
    let indexed = loader.run().await?;

    info!(indexed, database = %database.display(), "bulk load complete");

    Ok(())
}
