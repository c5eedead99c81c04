//! Picking the question table out of a multi-table source.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MappingError;

/// Substrings that mark a question-like column.
const QUESTION_PATTERNS: &[&str] = &["question", "stem", "prompt"];
/// Substrings that mark an answer-like column.
const ANSWER_PATTERNS: &[&str] = &["answer", "correct"];
/// Tables created by the storage engine or host frameworks.
const SYSTEM_TABLE_PREFIXES: &[&str] = &["sqlite_", "android_metadata"];

/// Name and columns of one table in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<String>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }
}

/// Returns true for tables that never hold user data.
pub fn is_system_table(name: &str) -> bool {
    let lowered = name.to_lowercase();
    SYSTEM_TABLE_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
}

/// Scores a table by its column names.
///
/// One point per column containing a question-like pattern and one per column
/// containing an answer-like pattern (case-insensitive substring match).
pub fn score_table(columns: &[String]) -> usize {
    columns
        .iter()
        .map(|column| {
            let lowered = column.to_lowercase();
            let question = QUESTION_PATTERNS.iter().any(|p| lowered.contains(p));
            let answer = ANSWER_PATTERNS.iter().any(|p| lowered.contains(p));
            usize::from(question) + usize::from(answer)
        })
        .sum()
}

/// Selects the highest-scoring non-system table.
///
/// Ties go to the first table encountered.
pub fn select_table(tables: &[TableSchema]) -> Result<&TableSchema, MappingError> {
    if tables.is_empty() {
        return Err(MappingError::NoTables);
    }

    let mut best: Option<(&TableSchema, usize)> = None;
    for table in tables.iter().filter(|t| !is_system_table(&t.name)) {
        let score = score_table(&table.columns);
        debug!(table = %table.name, score, "scored table");
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((table, score)),
        }
    }

    best.map(|(table, _)| table)
        .ok_or_else(|| MappingError::NoUserTables {
            system_tables: tables.iter().map(|t| t.name.clone()).collect(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, columns: &[&str]) -> TableSchema {
        TableSchema::new(name, columns.iter().map(|c| (*c).to_string()).collect())
    }

    #[test]
    fn picks_question_table_over_notes() {
        let tables = vec![
            table("notes", &["notes", "date"]),
            table("bank", &["Question", "Answer", "ChoiceA", "ChoiceB"]),
        ];
        assert_eq!(select_table(&tables).map(|t| t.name.as_str()), Ok("bank"));
    }

    #[test]
    fn ties_go_to_first_table() {
        let tables = vec![table("first", &["x"]), table("second", &["y"])];
        assert_eq!(select_table(&tables).map(|t| t.name.as_str()), Ok("first"));
    }

    #[test]
    fn system_tables_are_ignored() {
        let tables = vec![
            table("sqlite_sequence", &["name", "seq"]),
            table("questions", &["text"]),
        ];
        assert_eq!(select_table(&tables).map(|t| t.name.as_str()), Ok("questions"));
    }

    #[test]
    fn only_system_tables_is_an_error() {
        let tables = vec![table("sqlite_stat1", &["tbl"])];
        assert!(matches!(
            select_table(&tables),
            Err(MappingError::NoUserTables { .. })
        ));
        assert_eq!(select_table(&[]), Err(MappingError::NoTables));
    }

    #[test]
    fn score_counts_both_patterns() {
        let columns = vec![
            "Question Text".to_string(),
            "Correct Answer".to_string(),
            "Explanation".to_string(),
        ];
        // "Correct Answer" matches the answer patterns once, not twice.
        assert_eq!(score_table(&columns), 2);
    }
}
