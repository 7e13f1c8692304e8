//! HTTP API handlers for learnfit-scorer

pub mod categories;
pub mod health;
pub mod recalculation;
pub mod scores;
pub mod videos;

pub use categories::list_categories;
pub use health::health_routes;
pub use recalculation::{recalculate_all_videos, recalculate_video};
pub use scores::get_video_scores;
pub use videos::{create_video, delete_video, get_video, update_transcript};

use crate::error::ApiError;
use uuid::Uuid;

/// Parse a video id path segment, answering 400 with the JSON error body
fn parse_video_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid video id: {}", raw)))
}
