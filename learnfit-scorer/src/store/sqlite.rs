//! SQLite score store
//!
//! Scores live in `video_tags`, one row per (video, category). Matched
//! keywords are stored as a JSON array of strings.

use super::{ScoreRecord, ScoreStore};
use crate::error::ScoreError;
use async_trait::async_trait;
use learnfit_common::LearningCategory;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

/// `ScoreStore` backed by the shared learnfit database
#[derive(Clone)]
pub struct SqliteScoreStore {
    pool: SqlitePool,
}

impl SqliteScoreStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn video_exists(&self, video_id: Uuid) -> Result<bool, ScoreError> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM videos WHERE guid = ?")
            .bind(video_id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }
}

#[async_trait]
impl ScoreStore for SqliteScoreStore {
    async fn get_transcript(&self, video_id: Uuid) -> Result<Option<String>, ScoreError> {
        let row = sqlx::query("SELECT transcript FROM videos WHERE guid = ?")
            .bind(video_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(row.get::<Option<String>, _>("transcript")),
            None => Err(ScoreError::NotFound(video_id)),
        }
    }

    async fn replace_scores(
        &self,
        video_id: Uuid,
        records: &[ScoreRecord],
    ) -> Result<(), ScoreError> {
        let video_key = video_id.to_string();

        // Encode outside the transaction
        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let evidence = serde_json::to_string(&record.matched_keywords)
                .map_err(|e| ScoreError::StorageFailure(format!("Encode evidence: {}", e)))?;
            rows.push((record.category.id(), i64::from(record.score), evidence));
        }

        let mut tx = self.pool.begin().await?;

        // DELETE first takes the write lock; concurrent replaces wait on busy_timeout
        let deleted = sqlx::query("DELETE FROM video_tags WHERE video_id = ?")
            .bind(&video_key)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM videos WHERE guid = ?")
            .bind(&video_key)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            // Dropping tx rolls back
            return Err(ScoreError::NotFound(video_id));
        }

        for (category_id, score, evidence) in &rows {
            sqlx::query(
                r#"
                INSERT INTO video_tags (video_id, category_id, score, matched_keywords)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(&video_key)
            .bind(category_id)
            .bind(score)
            .bind(evidence)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(
            video_id = %video_id,
            deleted,
            inserted = rows.len(),
            "Replaced score records"
        );

        Ok(())
    }

    async fn get_scores(&self, video_id: Uuid) -> Result<Vec<ScoreRecord>, ScoreError> {
        if !self.video_exists(video_id).await? {
            return Err(ScoreError::NotFound(video_id));
        }

        let rows = sqlx::query(
            r#"
            SELECT category_id, score, matched_keywords
            FROM video_tags
            WHERE video_id = ?
            ORDER BY category_id
            "#,
        )
        .bind(video_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(decode_record).collect()
    }

    async fn list_video_ids(&self) -> Result<Vec<Uuid>, ScoreError> {
        let guids: Vec<String> = sqlx::query_scalar("SELECT guid FROM videos ORDER BY created_at, guid")
            .fetch_all(&self.pool)
            .await?;

        guids
            .iter()
            .map(|guid| {
                Uuid::parse_str(guid).map_err(|e| {
                    ScoreError::StorageFailure(format!("Invalid video guid '{}': {}", guid, e))
                })
            })
            .collect()
    }
}

fn decode_record(row: &sqlx::sqlite::SqliteRow) -> Result<ScoreRecord, ScoreError> {
    let category_id: i64 = row.get("category_id");
    let score: i64 = row.get("score");
    let evidence: String = row.get("matched_keywords");

    let category = LearningCategory::from_id(category_id).ok_or_else(|| {
        ScoreError::StorageFailure(format!("Unknown category id {}", category_id))
    })?;
    let score = u32::try_from(score)
        .map_err(|_| ScoreError::StorageFailure(format!("Score out of range: {}", score)))?;
    let matched_keywords: Vec<String> = serde_json::from_str(&evidence)
        .map_err(|e| ScoreError::StorageFailure(format!("Decode evidence: {}", e)))?;

    Ok(ScoreRecord {
        category,
        score,
        matched_keywords,
    })
}
