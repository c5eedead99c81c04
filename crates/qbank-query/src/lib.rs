//! Read-only queries over a canonical question dataset.
//!
//! - [`reference`]: parsing reference ids into book, chapter and label
//! - [`query`]: filtering, shuffling and reading-order delivery
//! - [`catalog`]: book/chapter/domain summaries for building queries

pub mod catalog;
pub mod error;
pub mod query;
pub mod reference;

pub use catalog::{BookEntry, Catalog, ChapterEntry, DomainCount};
pub use error::{QueryError, Result};
pub use query::{KindFilter, QueryOptions, ReviewFilter, Scope, run_query};
pub use reference::{RefParts, compare_reading_order, parse_reference};
