//! Database access for learnfit-scorer
//!
//! Schema and connection setup live in `learnfit_common::db`; score rows are
//! owned by `store::SqliteScoreStore`.

pub mod videos;
