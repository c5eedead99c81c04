//! Error types for table selection.

use std::fmt;

/// Errors from table selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// The source file contains no tables at all.
    NoTables,
    /// Every table in the source file is a system table.
    NoUserTables { system_tables: Vec<String> },
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTables => write!(f, "source contains no tables"),
            Self::NoUserTables { system_tables } => write!(
                f,
                "source contains only system tables: {}",
                system_tables.join(", ")
            ),
        }
    }
}

impl std::error::Error for MappingError {}
