//! Reference-id parsing and reading order.
//!
//! A reference id such as `Book1_Ch3_12` locates a question as book,
//! chapter and question label. Parsing never fails: missing parts fall back
//! to the source file name and fixed placeholder names.

use std::cmp::Ordering;
use std::path::Path;

use qbank_common::natural_cmp;
use qbank_model::{Question, UNCATEGORIZED};
use serde::Serialize;

/// Chapter used when a reference has a book and a label only.
pub const GENERAL_CHAPTER: &str = "General";

/// Chapter used when a reference has no book part.
pub const ALL_CHAPTER: &str = "All";

/// Label used when a reference is empty.
pub const DEFAULT_LABEL: &str = "0";

/// Parsed location of a question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RefParts {
    pub book: String,
    pub chapter: String,
    pub label: String,
    /// Numeric value of `label`, or 0 when the label is not a number.
    pub number: u64,
}

impl RefParts {
    /// Parses the reference id of `question`.
    pub fn of(question: &Question) -> Self {
        parse_reference(&question.ref_id, &question.source_file)
    }
}

/// Splits `raw` on runs of `_` or `.` into book, chapter and label.
///
/// | parts | book              | chapter   | label                 |
/// |-------|-------------------|-----------|-----------------------|
/// | ≥ 3   | part 0            | part 1    | parts 2.. joined by . |
/// | 2     | part 0            | `General` | part 1                |
/// | 0–1   | source file stem  | `All`     | part 0 or `0`         |
///
/// The source file stem falls back to `Uncategorized` when empty.
pub fn parse_reference(raw: &str, source_file: &str) -> RefParts {
    let parts: Vec<&str> = raw
        .trim()
        .split(['_', '.'])
        .filter(|part| !part.is_empty())
        .collect();

    let (book, chapter, label) = match parts.as_slice() {
        [book, chapter, rest @ ..] if !rest.is_empty() => {
            ((*book).to_string(), (*chapter).to_string(), rest.join("."))
        }
        [book, label] => (
            (*book).to_string(),
            GENERAL_CHAPTER.to_string(),
            (*label).to_string(),
        ),
        _ => (
            file_stem(source_file),
            ALL_CHAPTER.to_string(),
            parts.first().copied().unwrap_or(DEFAULT_LABEL).to_string(),
        ),
    };

    let number = label.parse().unwrap_or(0);
    RefParts {
        book,
        chapter,
        label,
        number,
    }
}

fn file_stem(source_file: &str) -> String {
    Path::new(source_file.trim())
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::trim)
        .filter(|stem| !stem.is_empty())
        .unwrap_or(UNCATEGORIZED)
        .to_string()
}

/// Strict reading order: book, chapter, question number, then label.
///
/// Book and chapter names compare with numeric-aware ordering, so
/// `Ch2` precedes `Ch10`.
pub fn compare_reading_order(a: &RefParts, b: &RefParts) -> Ordering {
    natural_cmp(&a.book, &b.book)
        .then_with(|| natural_cmp(&a.chapter, &b.chapter))
        .then_with(|| a.number.cmp(&b.number))
        .then_with(|| natural_cmp(&a.label, &b.label))
}
