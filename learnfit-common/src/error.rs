//! Error type shared by the learnfit crates

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of database setup, config loading and reference-data parsing
///
/// Score-path failures have their own type in the scorer crate.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad config file, taxonomy file or setting value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unparseable value supplied by a caller (e.g. unknown category slug)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Stored data that violates an invariant (e.g. malformed guid)
    #[error("Internal error: {0}")]
    Internal(String),
}
