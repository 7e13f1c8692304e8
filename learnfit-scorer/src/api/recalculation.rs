//! Recalculation triggers (single video and batch)

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use super::parse_video_id;
use crate::error::ApiResult;
use crate::services::{self, BatchReport, RecalculationOutcome};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct RecalculationResponse {
    pub video_id: Uuid,
    #[serde(flatten)]
    pub outcome: RecalculationOutcome,
}

/// POST /api/videos/:id/recalculate
///
/// 404 if the video does not exist, 503 if the scores could not be committed
/// (previous scores are kept).
pub async fn recalculate_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<RecalculationResponse>> {
    let video_id = parse_video_id(&id)?;
    let outcome = state.orchestrator.recalculate(video_id).await?;

    Ok(Json(RecalculationResponse { video_id, outcome }))
}

/// POST /api/recalculate
///
/// Per-video failures are reported in the body, not as an error status.
pub async fn recalculate_all_videos(State(state): State<AppState>) -> ApiResult<Json<BatchReport>> {
    let report = services::recalculate_all(&state.orchestrator, state.batch_concurrency).await?;
    Ok(Json(report))
}
