//! Read-only access to one source database.

use std::io::Write;

use qbank_map::TableSchema;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use tempfile::NamedTempFile;

use crate::error::{IngestError, Result};
use crate::source::SourceFile;

use super::quote_ident;

/// Magic bytes at the start of every SQLite 3 database file.
pub const SQLITE_HEADER: &[u8; 16] = b"SQLite format 3\0";

/// A source database opened read-only from in-memory bytes.
///
/// The bytes are staged in a temporary file that lives as long as the
/// connection.
pub struct SourceDatabase {
    conn: Connection,
    _staged: NamedTempFile,
}

impl SourceDatabase {
    /// Validates and opens the bytes of `source`.
    ///
    /// This is a sync function meant to run on a worker thread.
    pub fn open(source: &SourceFile) -> Result<Self> {
        if !source.bytes.starts_with(SQLITE_HEADER) {
            return Err(IngestError::NotSqlite {
                source_id: source.id.clone(),
            });
        }

        let staging = |err: std::io::Error| IngestError::Staging {
            source_id: source.id.clone(),
            source: err,
        };
        let mut staged = NamedTempFile::new().map_err(staging)?;
        staged.write_all(&source.bytes).map_err(staging)?;
        staged.flush().map_err(staging)?;

        let conn = Connection::open_with_flags(
            staged.path(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        Ok(Self {
            conn,
            _staged: staged,
        })
    }

    /// Lists every table with its column names, in creation order.
    pub fn tables(&self) -> Result<Vec<TableSchema>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        names
            .into_iter()
            .map(|name| {
                let columns = self.columns(&name)?;
                Ok(TableSchema::new(name, columns))
            })
            .collect()
    }

    fn columns(&self, table: &str) -> Result<Vec<String>> {
        let stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {} LIMIT 0", quote_ident(table)))?;
        Ok(stmt.column_names().into_iter().map(str::to_string).collect())
    }

    /// Reads every row of `table` as strings, in storage order.
    pub fn rows(&self, table: &str) -> Result<Vec<Vec<String>>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {}", quote_ident(table)))?;
        let width = stmt.column_count();
        let rows = stmt
            .query_map([], |row| {
                (0..width)
                    .map(|idx| row.get_ref(idx).map(value_to_string))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

/// Converts a SQLite cell to text.
///
/// NULL becomes an empty string and whole reals drop their fractional part,
/// so an answer stored as `1.0` reads as `"1"`.
pub fn value_to_string(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(v) => v.to_string(),
        ValueRef::Real(v) => format_numeric(v),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

/// Formats a floating-point number without trailing zeros.
fn format_numeric(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
