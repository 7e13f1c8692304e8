//! Database initialization
//!
//! Creates the database on first run and brings the schema up idempotently,
//! so every service can call `init_database` at startup.

use crate::{LearningCategory, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// How long a writer waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // foreign_keys is a per-connection pragma; setting it on the connect
    // options applies it to every pooled connection (video_tags cascade relies on it)
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Initialize a private in-memory database
///
/// Limited to a single connection that is never recycled: each new
/// connection to `sqlite::memory:` would otherwise see an empty database.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables (idempotent) and seed reference data
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_learning_categories_table(pool).await?;
    create_videos_table(pool).await?;
    create_video_tags_table(pool).await?;
    seed_learning_categories(pool).await?;
    Ok(())
}

async fn create_learning_categories_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS learning_categories (
            id INTEGER PRIMARY KEY,
            slug TEXT NOT NULL UNIQUE,
            display_name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_videos_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS videos (
            guid TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT,
            source_id TEXT,
            transcript TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_videos_source_id ON videos(source_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// One row per (video, category); the composite key enforces that a
/// recalculation can never leave duplicates behind.
async fn create_video_tags_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS video_tags (
            video_id TEXT NOT NULL REFERENCES videos(guid) ON DELETE CASCADE,
            category_id INTEGER NOT NULL REFERENCES learning_categories(id),
            score INTEGER NOT NULL CHECK (score >= 0),
            matched_keywords TEXT NOT NULL DEFAULT '[]',
            PRIMARY KEY (video_id, category_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn seed_learning_categories(pool: &SqlitePool) -> Result<()> {
    for category in LearningCategory::ALL {
        sqlx::query(
            "INSERT OR IGNORE INTO learning_categories (id, slug, display_name) VALUES (?, ?, ?)",
        )
        .bind(category.id())
        .bind(category.slug())
        .bind(category.display_name())
        .execute(pool)
        .await?;
    }

    Ok(())
}
