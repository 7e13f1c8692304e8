//! Video ingestion hooks
//!
//! Scores are recalculated whenever a video arrives or its transcript changes.
//! Deleting a video removes its score rows through the foreign-key cascade.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use learnfit_common::db::Video;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::parse_video_id;
use crate::db::videos;
use crate::error::{ApiError, ApiResult};
use crate::services::RecalculationOutcome;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    pub title: String,
    pub description: Option<String>,
    pub source_id: Option<String>,
    pub transcript: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTranscriptRequest {
    /// `null` marks the transcript as unavailable
    pub transcript: Option<String>,
}

/// Result of storing a video and scoring it
///
/// The video is stored even if scoring fails; `scoring_error` then says why
/// and a later recalculation can be requested.
#[derive(Debug, Serialize)]
pub struct VideoScoringResponse {
    pub video_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<RecalculationOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring_error: Option<String>,
}

/// Video metadata; the transcript itself is not echoed back
#[derive(Debug, Serialize)]
pub struct VideoResponse {
    pub video_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub source_id: Option<String>,
    pub has_transcript: bool,
}

#[derive(Debug, Serialize)]
pub struct DeleteVideoResponse {
    pub video_id: Uuid,
    pub deleted: bool,
}

/// POST /api/videos
pub async fn create_video(
    State(state): State<AppState>,
    Json(request): Json<CreateVideoRequest>,
) -> ApiResult<(StatusCode, Json<VideoScoringResponse>)> {
    let title = request.title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("title must not be empty".to_string()));
    }

    let video = Video {
        guid: Uuid::new_v4(),
        title: title.to_string(),
        description: request.description,
        source_id: request.source_id,
        transcript: request.transcript,
    };
    videos::save_video(&state.db, &video).await?;
    info!(video_id = %video.guid, title = %video.title, "Video created");

    Ok((StatusCode::CREATED, Json(score_after_change(&state, video.guid).await)))
}

/// GET /api/videos/:id
pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<VideoResponse>> {
    let video_id = parse_video_id(&id)?;

    let video = videos::load_video(&state.db, video_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Video {}", video_id)))?;

    Ok(Json(VideoResponse {
        video_id: video.guid,
        title: video.title,
        description: video.description,
        source_id: video.source_id,
        has_transcript: video.transcript.is_some(),
    }))
}

/// PUT /api/videos/:id/transcript
pub async fn update_transcript(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateTranscriptRequest>,
) -> ApiResult<Json<VideoScoringResponse>> {
    let video_id = parse_video_id(&id)?;

    let updated =
        videos::update_transcript(&state.db, video_id, request.transcript.as_deref()).await?;
    if !updated {
        return Err(ApiError::NotFound(format!("Video {}", video_id)));
    }
    info!(
        video_id = %video_id,
        has_transcript = request.transcript.is_some(),
        "Transcript updated"
    );

    Ok(Json(score_after_change(&state, video_id).await))
}

/// DELETE /api/videos/:id
pub async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteVideoResponse>> {
    let video_id = parse_video_id(&id)?;

    if !videos::delete_video(&state.db, video_id).await? {
        return Err(ApiError::NotFound(format!("Video {}", video_id)));
    }
    info!(video_id = %video_id, "Video deleted");

    Ok(Json(DeleteVideoResponse {
        video_id,
        deleted: true,
    }))
}

async fn score_after_change(state: &AppState, video_id: Uuid) -> VideoScoringResponse {
    match state.orchestrator.recalculate(video_id).await {
        Ok(outcome) => VideoScoringResponse {
            video_id,
            outcome: Some(outcome),
            scoring_error: None,
        },
        Err(e) => {
            warn!(video_id = %video_id, error = %e, "Scoring after update failed");
            VideoScoringResponse {
                video_id,
                outcome: None,
                scoring_error: Some(e.to_string()),
            }
        }
    }
}
