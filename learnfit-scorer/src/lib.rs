//! learnfit-scorer library
//!
//! Video compatibility scoring: estimates how well a video's transcript
//! matches each learning-style category by keyword matching, and persists an
//! auditable per-category breakdown.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod scoring;
pub mod services;
pub mod store;

pub use crate::error::{ApiError, ApiResult, ScoreError};

use axum::Router;
use scoring::Taxonomy;
use services::ScoringOrchestrator;
use sqlx::SqlitePool;
use std::sync::Arc;
use store::SqliteScoreStore;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (video ingestion)
    pub db: SqlitePool,
    /// Scoring core wired to the SQLite store
    pub orchestrator: ScoringOrchestrator,
    /// Parallelism for batch recalculation
    pub batch_concurrency: usize,
}

impl AppState {
    pub fn new(db: SqlitePool, taxonomy: Arc<Taxonomy>, batch_concurrency: usize) -> Self {
        let store = Arc::new(SqliteScoreStore::new(db.clone()));
        Self {
            db,
            orchestrator: ScoringOrchestrator::new(store, taxonomy),
            batch_concurrency,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post, put};

    let api = Router::new()
        .route("/api/categories", get(api::list_categories))
        .route("/api/videos", post(api::create_video))
        .route("/api/videos/:id", get(api::get_video).delete(api::delete_video))
        .route("/api/videos/:id/transcript", put(api::update_transcript))
        .route("/api/videos/:id/recalculate", post(api::recalculate_video))
        .route("/api/videos/:id/scores", get(api::get_video_scores))
        .route("/api/recalculate", post(api::recalculate_all_videos));

    Router::new()
        .merge(api)
        .merge(api::health_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                // Browser client is served from a different origin
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
