//! Taxonomy listing

use axum::{extract::State, Json};
use learnfit_common::LearningCategory;
use serde::Serialize;

use crate::scoring::Keyword;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct CategoryInfo {
    pub category: LearningCategory,
    pub display_name: &'static str,
    pub keywords: Vec<String>,
}

/// GET /api/categories
///
/// Categories in taxonomy order with the keywords they are scored on.
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<CategoryInfo>> {
    let categories = state
        .orchestrator
        .taxonomy()
        .iter()
        .map(|(category, keywords)| CategoryInfo {
            category,
            display_name: category.display_name(),
            keywords: keywords.iter().map(Keyword::text).map(str::to_string).collect(),
        })
        .collect();

    Json(categories)
}
