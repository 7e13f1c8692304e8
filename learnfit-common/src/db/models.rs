//! Database models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A row of the `videos` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub guid: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Identifier of the video at its hosting provider
    pub source_id: Option<String>,
    pub transcript: Option<String>,
}

impl Video {
    pub fn new(title: impl Into<String>, transcript: Option<String>) -> Self {
        Self {
            guid: Uuid::new_v4(),
            title: title.into(),
            description: None,
            source_id: None,
            transcript,
        }
    }
}
