//! Error handling for the scoring engine.
//!
//! Scoring itself never fails: missing or unusable data degrades to the
//! conservative defaults of each rule. Errors only surface while building the
//! engine (code tables, configuration, worker pool) and at the I/O edge.

use std::io;

/// Specialized error type for the scoring engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error opening, reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Error building or reading Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Error converting between serde records and Arrow batches
    #[error("Record conversion error: {0}")]
    SerdeArrow(#[from] serde_arrow::Error),

    /// Error parsing JSON configuration
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error creating the worker pool
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Configuration values that cannot be used
    #[error("Configuration error: {0}")]
    Config(String),

    /// A malformed row in a static code table
    #[error("Invalid code table entry '{entry}': {reason}")]
    CodeTable {
        /// The offending table entry
        entry: String,
        /// Why it was rejected
        reason: String,
    },

    /// An input record that cannot be turned into a domain event
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a code table error for the given entry
    pub fn code_table(entry: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CodeTable {
            entry: entry.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid record error
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;
