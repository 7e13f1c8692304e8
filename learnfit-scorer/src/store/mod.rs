//! Score store adapters
//!
//! `ScoreStore` is the only boundary the scoring core touches. The store is
//! also the serialization point for concurrent recalculations: each
//! `replace_scores` call must be atomic, and the last one to commit wins.

mod memory;
mod sqlite;

pub use memory::InMemoryScoreStore;
pub use sqlite::SqliteScoreStore;

use crate::error::ScoreError;
use async_trait::async_trait;
use learnfit_common::LearningCategory;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One category's score for one video (persisted as a `video_tags` row)
///
/// These three fields are the stable contract with read/ranking layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub category: LearningCategory,
    pub score: u32,
    /// Keywords that contributed to the score, in taxonomy order
    pub matched_keywords: Vec<String>,
}

/// Durable storage for transcripts and score records
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Transcript of a video; `Ok(None)` when the video has none
    ///
    /// Fails with `NotFound` if the video does not exist.
    async fn get_transcript(&self, video_id: Uuid) -> Result<Option<String>, ScoreError>;

    /// Atomically replace every score record of a video
    ///
    /// Old rows are deleted and `records` inserted as one unit; on error the
    /// previous records are left untouched. An empty `records` clears the video.
    async fn replace_scores(&self, video_id: Uuid, records: &[ScoreRecord])
        -> Result<(), ScoreError>;

    /// Score records of a video, ordered by category id
    ///
    /// Fails with `NotFound` if the video does not exist.
    async fn get_scores(&self, video_id: Uuid) -> Result<Vec<ScoreRecord>, ScoreError>;

    /// Every stored video id, for batch recalculation
    async fn list_video_ids(&self) -> Result<Vec<Uuid>, ScoreError>;
}
