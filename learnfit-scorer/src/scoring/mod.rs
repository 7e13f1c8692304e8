//! Keyword-match scoring: taxonomy, normalizer, per-category scorer
//!
//! Everything in this module is pure and infallible; only the store boundary
//! can fail.

pub mod category_scorer;
pub mod normalizer;
pub mod taxonomy;

pub use category_scorer::{score, CategoryScore};
pub use normalizer::{normalize, NormalizedText};
pub use taxonomy::{Keyword, Taxonomy};
