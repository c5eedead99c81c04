//! Question-bank ingestion.
//!
//! Each source is a SQLite file whose table and column names are unknown in
//! advance. Ingestion picks the likely question table, maps its columns onto
//! the canonical fields, normalizes every row and merges all sources into
//! one immutable dataset.
//!
//! # Example
//!
//! ```ignore
//! use qbank_ingest::{IngestOptions, SourceFile, merge_sources};
//!
//! let sources = vec![SourceFile::new("bank1", "Bank One.db", bytes)];
//! let outcome = merge_sources(&sources, &IngestOptions::default())?;
//! println!("imported {}", outcome.imported);
//! ```

pub mod engine;
pub mod error;
pub mod normalize;
pub mod options;
pub mod source;
pub mod sqlite;
pub mod worker;

pub use engine::{MergeOutcome, SourceReport, merge_sources};
pub use error::{IngestError, Result};
pub use normalize::{RowLayout, normalize_answer, normalize_choice_cell, normalize_row};
pub use options::{DEFAULT_CANONICAL_TABLE, IngestOptions, MAX_SOURCE_BYTES};
pub use source::SourceFile;
pub use sqlite::{CanonicalStore, SourceDatabase, export_sqlite};
pub use worker::{MergeHandle, MergeMessage, QuestionBank, merge_async, spawn_merge};
