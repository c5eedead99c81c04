//! The canonical question table.

use std::path::Path;

use qbank_model::{Choices, Dataset, Labels, Question, QuestionDraft};
use rusqlite::{Connection, Row, params};
use tracing::debug;

use crate::error::{IngestError, Result};

use super::quote_ident;

/// Column holding the JSON choice map; read back when an export is merged.
pub const CHOICES_JSON_COLUMN: &str = "choices_json";

const COLUMNS: &str = "id, source_file, text, ref_id, correct_answer, choices_json, explanation, \
                       domain, sub_domain, topic, chapter, heading, hint1, hint2, hint3, kind";

/// One canonical table, staged in memory during a merge or written to disk
/// on export.
pub struct CanonicalStore {
    conn: Connection,
    table: String,
}

impl CanonicalStore {
    /// Creates an empty in-memory store.
    pub fn open_in_memory(table: &str) -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?, table)
    }

    /// Creates (or replaces) the canonical table in a database file.
    pub fn create_file(path: &Path, table: &str) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| IngestError::Export {
            path: path.to_path_buf(),
            source,
        })?;
        conn.execute_batch(&format!("DROP TABLE IF EXISTS {}", quote_ident(table)))?;
        Self::with_connection(conn, table)
    }

    fn with_connection(conn: Connection, table: &str) -> Result<Self> {
        conn.execute_batch(&format!(
            "CREATE TABLE {} (
                id TEXT PRIMARY KEY NOT NULL,
                source_file TEXT NOT NULL,
                text TEXT NOT NULL,
                ref_id TEXT NOT NULL,
                correct_answer TEXT NOT NULL,
                choices_json TEXT NOT NULL,
                explanation TEXT NOT NULL,
                domain TEXT NOT NULL,
                sub_domain TEXT NOT NULL,
                topic TEXT NOT NULL,
                chapter TEXT NOT NULL,
                heading TEXT NOT NULL,
                hint1 TEXT,
                hint2 TEXT,
                hint3 TEXT,
                kind TEXT NOT NULL
            )",
            quote_ident(table)
        ))?;
        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    /// Inserts `questions` in one transaction: all rows commit or none do.
    pub fn insert_batch(&mut self, questions: &[Question]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(&format!(
                "INSERT INTO {} ({COLUMNS}) VALUES \
                 (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
                quote_ident(&self.table)
            ))?;
            for question in questions {
                let choices = serde_json::to_string(&question.choices)?;
                stmt.execute(params![
                    question.id,
                    question.source_file,
                    question.text,
                    question.ref_id,
                    question.correct_answer,
                    choices,
                    question.explanation,
                    question.domain.to_pipe_string(),
                    question.sub_domain.to_pipe_string(),
                    question.topic.to_pipe_string(),
                    question.chapter.to_pipe_string(),
                    question.heading.to_pipe_string(),
                    question.hint1,
                    question.hint2,
                    question.hint3,
                    question.kind().as_str(),
                ])?;
            }
        }
        tx.commit()?;
        debug!(table = %self.table, rows = questions.len(), "committed batch");
        Ok(questions.len())
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", quote_ident(&self.table)),
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Reads every row back, in insertion order.
    pub fn load(&self) -> Result<Vec<Question>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM {} ORDER BY rowid",
            quote_ident(&self.table)
        ))?;
        let drafts = stmt
            .query_map([], row_to_draft)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        drafts
            .into_iter()
            .map(|(draft, choices)| {
                let choices: Choices = serde_json::from_str(&choices)?;
                Ok(QuestionDraft { choices, ..draft }.build())
            })
            .collect()
    }

    /// Reads every row back as a dataset.
    pub fn to_dataset(&self) -> Result<Dataset> {
        Ok(Dataset::new(self.load()?)?)
    }
}

fn row_to_draft(row: &Row<'_>) -> rusqlite::Result<(QuestionDraft, String)> {
    let labels = |idx: usize| -> rusqlite::Result<Labels> {
        Ok(Labels::parse(&row.get::<_, String>(idx)?))
    };
    let draft = QuestionDraft {
        id: row.get(0)?,
        source_file: row.get(1)?,
        text: row.get(2)?,
        ref_id: row.get(3)?,
        correct_answer: row.get(4)?,
        choices: Choices::new(),
        explanation: row.get(6)?,
        domain: labels(7)?,
        sub_domain: labels(8)?,
        topic: labels(9)?,
        chapter: labels(10)?,
        heading: labels(11)?,
        hint1: row.get(12)?,
        hint2: row.get(13)?,
        hint3: row.get(14)?,
    };
    Ok((draft, row.get(5)?))
}

/// Writes a dataset to a SQLite file as one canonical table.
pub fn export_sqlite(dataset: &Dataset, path: &Path, table: &str) -> Result<usize> {
    let mut store = CanonicalStore::create_file(path, table)?;
    store.insert_batch(dataset.questions())
}
