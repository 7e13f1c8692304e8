//! # Learnfit Common Library
//!
//! Shared code for the learnfit services:
//! - Learning category reference data
//! - Database initialization and row models
//! - Configuration loading and root folder resolution
//! - Common error type

pub mod category;
pub mod config;
pub mod db;
pub mod error;

pub use category::LearningCategory;
pub use error::{Error, Result};
