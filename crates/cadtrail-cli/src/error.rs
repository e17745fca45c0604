//! CLI error types

use cadtrail_engine::AggregateError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised outside the aggregation engine
#[derive(Debug, Error)]
pub enum CliError {
    /// Filesystem failure
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Directory traversal failure
    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Unreadable or unwritable CSV
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        source: csv::Error,
    },

    /// Invalid configuration file
    #[error("invalid config {path}: {source}")]
    Config {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        source: toml::de::Error,
    },

    /// Directory held no audit trails
    #[error("no .csv audit trails found under {0}")]
    NoSources(PathBuf),

    /// Unknown export format name
    #[error("unknown output format: {0} (expected csv or json)")]
    UnknownFormat(String),

    /// JSON encoding failure
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Aggregation failure
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

impl CliError {
    /// Check if the error is confined to a single input file
    #[must_use]
    pub fn is_source_local(&self) -> bool {
        match self {
            Self::Csv { .. } | Self::Io { .. } => true,
            Self::Aggregate(error) => error.is_source_local(),
            _ => false,
        }
    }
}
