//! Scoring services: per-video orchestration and batch dispatch

pub mod batch;
pub mod recalculation;

pub use batch::{recalculate_all, recalculate_batch, BatchFailure, BatchReport};
pub use recalculation::{RecalculationOutcome, ScoringOrchestrator};
