//! In-memory score store
//!
//! Used by tests and for embedding the scorer without a database. The write
//! lock is held for the whole replace, so concurrent replaces of one video
//! serialize the same way SQLite transactions do.

use super::{ScoreRecord, ScoreStore};
use crate::error::ScoreError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct MemoryState {
    // Insertion order, for list_video_ids
    order: Vec<Uuid>,
    transcripts: HashMap<Uuid, Option<String>>,
    scores: HashMap<Uuid, Vec<ScoreRecord>>,
}

#[derive(Default)]
pub struct InMemoryScoreStore {
    state: RwLock<MemoryState>,
    fail_writes: AtomicBool,
}

impl InMemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a video, or replace its transcript if it already exists
    pub async fn upsert_video(&self, video_id: Uuid, transcript: Option<String>) {
        let mut state = self.state.write().await;
        if state.transcripts.insert(video_id, transcript).is_none() {
            state.order.push(video_id);
        }
    }

    /// Delete a video and its score records
    pub async fn remove_video(&self, video_id: Uuid) -> bool {
        let mut state = self.state.write().await;
        state.scores.remove(&video_id);
        state.order.retain(|id| *id != video_id);
        state.transcripts.remove(&video_id).is_some()
    }

    /// Make every subsequent `replace_scores` fail with `StorageFailure`
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ScoreStore for InMemoryScoreStore {
    async fn get_transcript(&self, video_id: Uuid) -> Result<Option<String>, ScoreError> {
        let state = self.state.read().await;
        state
            .transcripts
            .get(&video_id)
            .cloned()
            .ok_or(ScoreError::NotFound(video_id))
    }

    async fn replace_scores(
        &self,
        video_id: Uuid,
        records: &[ScoreRecord],
    ) -> Result<(), ScoreError> {
        let mut state = self.state.write().await;

        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ScoreError::StorageFailure(
                "injected write failure".to_string(),
            ));
        }
        if !state.transcripts.contains_key(&video_id) {
            return Err(ScoreError::NotFound(video_id));
        }

        let mut sorted = records.to_vec();
        sorted.sort_by_key(|record| record.category.id());
        if sorted.windows(2).any(|pair| pair[0].category == pair[1].category) {
            return Err(ScoreError::StorageFailure(format!(
                "Duplicate category in score records for video {}",
                video_id
            )));
        }

        state.scores.insert(video_id, sorted);
        Ok(())
    }

    async fn get_scores(&self, video_id: Uuid) -> Result<Vec<ScoreRecord>, ScoreError> {
        let state = self.state.read().await;
        if !state.transcripts.contains_key(&video_id) {
            return Err(ScoreError::NotFound(video_id));
        }
        Ok(state.scores.get(&video_id).cloned().unwrap_or_default())
    }

    async fn list_video_ids(&self) -> Result<Vec<Uuid>, ScoreError> {
        Ok(self.state.read().await.order.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnfit_common::LearningCategory;

    fn record(category: LearningCategory, score: u32) -> ScoreRecord {
        ScoreRecord {
            category,
            score,
            matched_keywords: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_replace_and_cascade_on_remove() {
        let store = InMemoryScoreStore::new();
        let video_id = Uuid::new_v4();
        store.upsert_video(video_id, Some("text".into())).await;

        store
            .replace_scores(video_id, &[record(LearningCategory::Kinesthetic, 1), record(LearningCategory::Visual, 2)])
            .await
            .unwrap();
        let stored = store.get_scores(video_id).await.unwrap();
        assert_eq!(stored[0].category, LearningCategory::Visual);
        assert_eq!(stored[1].category, LearningCategory::Kinesthetic);

        assert!(store.remove_video(video_id).await);
        assert!(matches!(store.get_scores(video_id).await, Err(ScoreError::NotFound(_))));
        assert!(store.list_video_ids().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_injected_failure_keeps_prior_state() {
        let store = InMemoryScoreStore::new();
        let video_id = Uuid::new_v4();
        store.upsert_video(video_id, None).await;
        store
            .replace_scores(video_id, &[record(LearningCategory::Auditory, 3)])
            .await
            .unwrap();

        store.set_fail_writes(true);
        let result = store.replace_scores(video_id, &[]).await;
        assert!(matches!(result, Err(ScoreError::StorageFailure(_))));

        assert_eq!(
            store.get_scores(video_id).await.unwrap(),
            vec![record(LearningCategory::Auditory, 3)]
        );
    }

    #[tokio::test]
    async fn test_duplicate_category_rejected() {
        let store = InMemoryScoreStore::new();
        let video_id = Uuid::new_v4();
        store.upsert_video(video_id, None).await;

        let result = store
            .replace_scores(video_id, &[record(LearningCategory::Visual, 1), record(LearningCategory::Visual, 2)])
            .await;
        assert!(result.is_err());
        assert!(store.get_scores(video_id).await.unwrap().is_empty());
    }
}
