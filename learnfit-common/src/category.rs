//! Learning-style categories
//!
//! Fixed reference data. The numeric id and slug are persisted in
//! `learning_categories` and referenced by `video_tags.category_id`, so they
//! must never change once assigned.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Learning-style classification used to tag videos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningCategory {
    Visual,
    Auditory,
    ReadingWriting,
    Kinesthetic,
}

impl LearningCategory {
    /// Every category, in canonical (id) order
    pub const ALL: [LearningCategory; 4] = [
        LearningCategory::Visual,
        LearningCategory::Auditory,
        LearningCategory::ReadingWriting,
        LearningCategory::Kinesthetic,
    ];

    /// Stable database identifier
    pub fn id(self) -> i64 {
        match self {
            LearningCategory::Visual => 1,
            LearningCategory::Auditory => 2,
            LearningCategory::ReadingWriting => 3,
            LearningCategory::Kinesthetic => 4,
        }
    }

    /// Machine name used in config files and JSON
    pub fn slug(self) -> &'static str {
        match self {
            LearningCategory::Visual => "visual",
            LearningCategory::Auditory => "auditory",
            LearningCategory::ReadingWriting => "reading_writing",
            LearningCategory::Kinesthetic => "kinesthetic",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LearningCategory::Visual => "Visual",
            LearningCategory::Auditory => "Auditory",
            LearningCategory::ReadingWriting => "Reading/Writing",
            LearningCategory::Kinesthetic => "Kinesthetic",
        }
    }

    /// Look up a category by its database identifier
    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl fmt::Display for LearningCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for LearningCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.slug() == wanted)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown learning category: {}", s)))
    }
}
