//! Scoring orchestrator
//!
//! Drives one video's recalculation end to end:
//! 1. Read the transcript through the store (`NotFound` aborts, nothing written)
//! 2. No transcript: clear existing scores, report `NoTranscript`
//! 3. Normalize the transcript once
//! 4. Score every category in taxonomy order
//! 5. Atomically replace the video's score records
//!
//! Holds no mutable state of its own; the only shared data is the read-only
//! taxonomy, so recalculations of different videos can run in parallel.

use crate::error::ScoreError;
use crate::scoring::{self, normalize, Taxonomy};
use crate::store::{ScoreRecord, ScoreStore};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What a recalculation did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecalculationOutcome {
    /// Every category was scored and persisted
    Scored { records: Vec<ScoreRecord> },
    /// Video has no transcript; any previous scores were cleared
    NoTranscript,
}

/// Runs the category scorer over all categories and persists the result
#[derive(Clone)]
pub struct ScoringOrchestrator {
    store: Arc<dyn ScoreStore>,
    taxonomy: Arc<Taxonomy>,
}

impl ScoringOrchestrator {
    pub fn new(store: Arc<dyn ScoreStore>, taxonomy: Arc<Taxonomy>) -> Self {
        Self { store, taxonomy }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Score a transcript against every category without persisting
    ///
    /// One record per category, in taxonomy order. Infallible.
    pub fn score_transcript(&self, transcript: &str) -> Vec<ScoreRecord> {
        let normalized = normalize(transcript);
        debug!(tokens = normalized.len(), "Normalized transcript");

        self.taxonomy
            .iter()
            .map(|(category, keywords)| {
                let result = scoring::score(&normalized, keywords);
                debug!(
                    category = %category,
                    score = result.score,
                    matched = result.matched_keywords.len(),
                    "Scored category"
                );
                ScoreRecord {
                    category,
                    score: result.score,
                    matched_keywords: result.matched_keywords,
                }
            })
            .collect()
    }

    /// Recalculate and persist the scores of one video
    ///
    /// Running this twice on an unchanged transcript stores identical records.
    pub async fn recalculate(&self, video_id: Uuid) -> Result<RecalculationOutcome, ScoreError> {
        let transcript = self.store.get_transcript(video_id).await?;

        let Some(transcript) = transcript else {
            // No evidence: no rows, whether or not the video was scored before
            self.persist(video_id, &[]).await?;
            info!(video_id = %video_id, "No transcript; cleared scores");
            return Ok(RecalculationOutcome::NoTranscript);
        };

        let records = self.score_transcript(&transcript);
        self.persist(video_id, &records).await?;

        let total: u64 = records.iter().map(|r| u64::from(r.score)).sum();
        info!(
            video_id = %video_id,
            total_score = total,
            matched_categories = records.iter().filter(|r| r.score > 0).count(),
            "Recalculated video scores"
        );

        Ok(RecalculationOutcome::Scored { records })
    }

    /// Stored score records of a video, ordered by category
    pub async fn get_scores(&self, video_id: Uuid) -> Result<Vec<ScoreRecord>, ScoreError> {
        self.store.get_scores(video_id).await
    }

    /// Whether the video currently has a transcript
    pub async fn has_transcript(&self, video_id: Uuid) -> Result<bool, ScoreError> {
        Ok(self.store.get_transcript(video_id).await?.is_some())
    }

    pub async fn list_video_ids(&self) -> Result<Vec<Uuid>, ScoreError> {
        self.store.list_video_ids().await
    }

    async fn persist(&self, video_id: Uuid, records: &[ScoreRecord]) -> Result<(), ScoreError> {
        self.store
            .replace_scores(video_id, records)
            .await
            .inspect_err(|e| warn!(video_id = %video_id, error = %e, "Failed to persist scores"))
    }
}
