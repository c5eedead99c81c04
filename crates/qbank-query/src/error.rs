//! Error types for queries.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// No merge has ever produced a dataset.
    #[error("no canonical dataset has been built yet")]
    DatasetNotBuilt,
}

pub type Result<T> = std::result::Result<T, QueryError>;
