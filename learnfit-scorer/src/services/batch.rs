//! Batch recalculation
//!
//! Each video is an independent unit of work. A failure is logged and
//! recorded in the report; it never aborts the remaining videos.

use super::recalculation::{RecalculationOutcome, ScoringOrchestrator};
use crate::error::ScoreError;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

/// A video whose recalculation failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchFailure {
    pub video_id: Uuid,
    pub error: String,
}

/// Per-video results of a batch, each list in submission order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub scored: Vec<Uuid>,
    pub no_transcript: Vec<Uuid>,
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.scored.len() + self.no_transcript.len() + self.failed.len()
    }

    /// One-line summary when any video failed; `None` for a clean run
    pub fn failure_summary(&self) -> Option<String> {
        if self.failed.is_empty() {
            return None;
        }
        Some(format!("{} of {} videos failed", self.failed.len(), self.total()))
    }

    pub fn log_failures(&self) {
        for failure in &self.failed {
            warn!(video_id = %failure.video_id, error = %failure.error, "Video not rescored");
        }
    }
}

/// Recalculate the given videos, at most `concurrency` at a time
pub async fn recalculate_batch(
    orchestrator: &ScoringOrchestrator,
    video_ids: Vec<Uuid>,
    concurrency: usize,
) -> BatchReport {
    let mut results: Vec<(usize, Uuid, Result<RecalculationOutcome, ScoreError>)> =
        stream::iter(video_ids.into_iter().enumerate())
            .map(|(index, video_id)| async move {
                (index, video_id, orchestrator.recalculate(video_id).await)
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;
    results.sort_by_key(|(index, _, _)| *index);

    let mut report = BatchReport::default();
    for (_, video_id, result) in results {
        match result {
            Ok(RecalculationOutcome::Scored { .. }) => report.scored.push(video_id),
            Ok(RecalculationOutcome::NoTranscript) => report.no_transcript.push(video_id),
            Err(e) => {
                warn!(video_id = %video_id, error = %e, "Recalculation failed; continuing batch");
                report.failed.push(BatchFailure {
                    video_id,
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        scored = report.scored.len(),
        no_transcript = report.no_transcript.len(),
        failed = report.failed.len(),
        "Batch recalculation finished"
    );

    report
}

/// Recalculate every stored video
///
/// Only listing the videos can fail the whole call.
pub async fn recalculate_all(
    orchestrator: &ScoringOrchestrator,
    concurrency: usize,
) -> Result<BatchReport, ScoreError> {
    let video_ids = orchestrator.list_video_ids().await?;
    info!(videos = video_ids.len(), concurrency, "Starting batch recalculation");
    Ok(recalculate_batch(orchestrator, video_ids, concurrency).await)
}
