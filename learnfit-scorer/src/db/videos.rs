//! Video database operations
//!
//! Used by the ingestion endpoint; transcripts arrive from the external
//! transcript service already fetched.

use learnfit_common::db::Video;
use learnfit_common::{Error, Result};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Insert a new video
pub async fn save_video(pool: &SqlitePool, video: &Video) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO videos (guid, title, description, source_id, transcript, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(video.guid.to_string())
    .bind(&video.title)
    .bind(&video.description)
    .bind(&video.source_id)
    .bind(&video.transcript)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load a video by guid
pub async fn load_video(pool: &SqlitePool, guid: Uuid) -> Result<Option<Video>> {
    let row = sqlx::query(
        r#"
        SELECT guid, title, description, source_id, transcript
        FROM videos
        WHERE guid = ?
        "#,
    )
    .bind(guid.to_string())
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let guid_str: String = row.get("guid");
            Ok(Some(Video {
                guid: Uuid::parse_str(&guid_str)
                    .map_err(|e| Error::Internal(format!("Invalid video guid '{}': {}", guid_str, e)))?,
                title: row.get("title"),
                description: row.get("description"),
                source_id: row.get("source_id"),
                transcript: row.get("transcript"),
            }))
        }
        None => Ok(None),
    }
}

/// Set or clear a video's transcript
///
/// Returns false if the video does not exist.
pub async fn update_transcript(
    pool: &SqlitePool,
    guid: Uuid,
    transcript: Option<&str>,
) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE videos SET transcript = ?, updated_at = CURRENT_TIMESTAMP WHERE guid = ?",
    )
    .bind(transcript)
    .bind(guid.to_string())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a video; its score records cascade
///
/// Returns false if the video did not exist.
pub async fn delete_video(pool: &SqlitePool, guid: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM videos WHERE guid = ?")
        .bind(guid.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnfit_common::db::init_memory_database;

    #[tokio::test]
    async fn test_save_and_load_video() {
        let pool = init_memory_database().await.unwrap();

        let mut video = Video::new("Fractions with pizza", Some("cut the pizza".into()));
        video.source_id = Some("yt:abc123".into());
        save_video(&pool, &video).await.unwrap();

        let loaded = load_video(&pool, video.guid).await.unwrap();
        assert_eq!(loaded, Some(video));
        assert_eq!(load_video(&pool, Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let pool = init_memory_database().await.unwrap();
        let video = Video::new("Lecture", None);
        save_video(&pool, &video).await.unwrap();

        assert!(update_transcript(&pool, video.guid, Some("now with text")).await.unwrap());
        let loaded = load_video(&pool, video.guid).await.unwrap().unwrap();
        assert_eq!(loaded.transcript.as_deref(), Some("now with text"));

        assert!(delete_video(&pool, video.guid).await.unwrap());
        assert!(!delete_video(&pool, video.guid).await.unwrap());
        assert!(!update_transcript(&pool, video.guid, None).await.unwrap());
    }
}
