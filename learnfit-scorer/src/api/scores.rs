//! Score read path
//!
//! The store returns records in category order; ranking happens here.

use axum::{
    extract::{Path, State},
    Json,
};
use learnfit_common::LearningCategory;
use serde::Serialize;
use uuid::Uuid;

use super::parse_video_id;
use crate::error::ApiResult;
use crate::store::ScoreRecord;
use crate::AppState;

/// One category's score with its share of the video's total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedScore {
    pub category: LearningCategory,
    pub display_name: &'static str,
    pub score: u32,
    pub matched_keywords: Vec<String>,
    /// score / total, 0.0 when the total is 0
    pub share: f64,
}

/// Why a video has the score rows it has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
    /// Transcript present and scored
    Scored,
    /// No transcript, so no evidence and no rows
    NoTranscript,
    /// Transcript present but no rows yet (scoring failed or not run)
    Pending,
}

impl ScoreStatus {
    pub fn classify(has_transcript: bool, records: &[ScoreRecord]) -> Self {
        match (has_transcript, records.is_empty()) {
            (false, _) => ScoreStatus::NoTranscript,
            (true, true) => ScoreStatus::Pending,
            (true, false) => ScoreStatus::Scored,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScoresResponse {
    pub video_id: Uuid,
    pub status: ScoreStatus,
    pub total_score: u64,
    pub scores: Vec<RankedScore>,
}

/// Rank records by descending score; ties keep category order
pub fn rank_scores(records: Vec<ScoreRecord>) -> Vec<RankedScore> {
    let total: u64 = records.iter().map(|r| u64::from(r.score)).sum();

    let mut ranked: Vec<RankedScore> = records
        .into_iter()
        .map(|record| RankedScore {
            category: record.category,
            display_name: record.category.display_name(),
            score: record.score,
            share: if total == 0 {
                0.0
            } else {
                f64::from(record.score) / total as f64
            },
            matched_keywords: record.matched_keywords,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.category.id().cmp(&b.category.id()))
    });
    ranked
}

/// GET /api/videos/:id/scores
pub async fn get_video_scores(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ScoresResponse>> {
    let video_id = parse_video_id(&id)?;
    let records = state.orchestrator.get_scores(video_id).await?;
    let has_transcript = state.orchestrator.has_transcript(video_id).await?;
    let status = ScoreStatus::classify(has_transcript, &records);

    let scores = rank_scores(records);
    Ok(Json(ScoresResponse {
        video_id,
        status,
        total_score: scores.iter().map(|s| u64::from(s.score)).sum(),
        scores,
    }))
}
