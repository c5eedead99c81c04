//! Column mapping for question-bank source tables.
//!
//! Source files come from many authors, so nothing about their layout is
//! fixed. This crate turns a list of column names into a [`FieldMap`]:
//!
//! - [`select_table`] picks the table that looks most like a question bank
//! - [`map_columns`] resolves each canonical field through an ordered
//!   [`AliasTable`]
//! - [`detect_choice_column`] recognizes `A`, `choice_b`, `Choice 3`, ...
//!
//! Everything here is a pure function of the column names; unknown input
//! degrades to unmapped fields rather than errors.

mod aliases;
mod choice;
mod error;
mod mapping;
mod table;
mod utils;

pub use aliases::{AliasTable, CanonicalField};
pub use choice::{ChoiceColumn, detect_choice_column};
pub use error::MappingError;
pub use mapping::{FieldMap, map_columns};
pub use table::{TableSchema, is_system_table, score_table, select_table};
pub use utils::normalize_column_name;
