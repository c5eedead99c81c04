//! SQLite access: reading source files and the canonical question store.

mod reader;
mod store;

pub use reader::{SQLITE_HEADER, SourceDatabase, value_to_string};
pub use store::{CHOICES_JSON_COLUMN, CanonicalStore, export_sqlite};

/// Quotes an SQL identifier.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
