//! learnfit-scorer - Video learning-style compatibility scoring service
//!
//! Runs the HTTP API by default; `recalculate` runs a batch pass and exits.

use anyhow::{Context, Result};
use clap::Parser;
use learnfit_common::config::{RootFolderInitializer, TomlConfig};
use learnfit_scorer::config::{Cli, Command, ServiceSettings, MODULE_NAME};
use learnfit_scorer::scoring::Taxonomy;
use learnfit_scorer::services;
use learnfit_scorer::{build_router, AppState};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting {} v{}", MODULE_NAME, env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let toml = TomlConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load config file")?;
    let settings = ServiceSettings::resolve(&cli, &toml)?;

    let initializer = RootFolderInitializer::new(settings.root_folder.clone());
    initializer.ensure_directory_exists()?;
    info!("Root folder: {}", initializer.root_folder().display());

    let db_path = initializer.database_path();
    info!("Database path: {}", db_path.display());

    let pool = match learnfit_common::db::init_database(&db_path).await {
        Ok(pool) => {
            info!("✓ Database ready");
            pool
        }
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    let taxonomy = match &settings.taxonomy_path {
        Some(path) => Taxonomy::load(path)
            .with_context(|| format!("Failed to load taxonomy from {}", path.display()))?,
        None => Taxonomy::builtin(),
    };
    info!("Taxonomy ready ({} keywords)", taxonomy.keyword_count());

    let state = AppState::new(pool, Arc::new(taxonomy), settings.batch_concurrency);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Recalculate { videos } => {
            let report = if videos.is_empty() {
                services::recalculate_all(&state.orchestrator, settings.batch_concurrency).await?
            } else {
                services::recalculate_batch(&state.orchestrator, videos, settings.batch_concurrency)
                    .await
            };
            report.log_failures();
            if let Some(summary) = report.failure_summary() {
                anyhow::bail!(summary);
            }
        }
        Command::Serve => {
            let addr = format!("127.0.0.1:{}", settings.port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            info!("{} listening on http://{}", MODULE_NAME, addr);
            info!("Health check: http://{}/health", addr);

            axum::serve(listener, build_router(state)).await?;
        }
    }

    Ok(())
}
