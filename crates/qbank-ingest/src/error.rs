//! Error types for question-bank ingestion.

use std::path::PathBuf;

use qbank_map::MappingError;
use thiserror::Error;

/// Errors that can occur while ingesting or merging sources.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Source Errors (recoverable, per source) ===
    /// Source bytes exceed the configured limit.
    #[error("source {source_id} is too large: {size} bytes (max {max_size})")]
    SourceTooLarge {
        source_id: String,
        size: u64,
        max_size: u64,
    },

    /// Source bytes are not a SQLite database.
    #[error("source {source_id} is not a SQLite database")]
    NotSqlite { source_id: String },

    /// No usable table in the source.
    #[error("source {source_id}: {source}")]
    NoTable {
        source_id: String,
        #[source]
        source: MappingError,
    },

    /// Failed to stage source bytes on disk.
    #[error("failed to stage source {source_id}: {source}")]
    Staging {
        source_id: String,
        #[source]
        source: std::io::Error,
    },

    // === Storage Errors ===
    /// SQLite operation failed.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Choices could not be encoded or decoded.
    #[error("failed to encode choices: {0}")]
    Choices(#[from] serde_json::Error),

    /// Canonical dataset could not be assembled.
    #[error("invalid canonical dataset: {0}")]
    Dataset(#[from] qbank_model::ModelError),

    /// Failed to write an exported dataset.
    #[error("failed to export dataset to {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    // === Merge Errors ===
    /// The background merge reported a failure.
    #[error("merge failed: {message}")]
    MergeFailed { message: String },

    // === Configuration Errors ===
    /// Ingest options could not be parsed.
    #[error("invalid ingest options: {0}")]
    Options(#[from] toml::de::Error),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
