//! Canonical fields and the column aliases that resolve to them.

use serde::{Deserialize, Serialize};

use crate::utils::normalize_column_name;

/// A field of the canonical question table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    QuestionText,
    RefId,
    CorrectAnswer,
    Explanation,
    Domain,
    SubDomain,
    Topic,
    Chapter,
    Heading,
    RowId,
    Hint1,
    Hint2,
    Hint3,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 13] = [
        Self::QuestionText,
        Self::RefId,
        Self::CorrectAnswer,
        Self::Explanation,
        Self::Domain,
        Self::SubDomain,
        Self::Topic,
        Self::Chapter,
        Self::Heading,
        Self::RowId,
        Self::Hint1,
        Self::Hint2,
        Self::Hint3,
    ];

    /// Built-in aliases, most specific first.
    pub fn default_aliases(self) -> &'static [&'static str] {
        match self {
            Self::QuestionText => &[
                "question text",
                "question_text",
                "questiontext",
                "question",
                "stem",
                "prompt",
                "text",
            ],
            Self::RefId => &[
                "reference id",
                "reference_id",
                "ref id",
                "ref_id",
                "refid",
                "reference",
                "question id",
                "question_id",
                "qid",
                "ref",
            ],
            Self::CorrectAnswer => &[
                "correct answer",
                "correct_answer",
                "correctanswer",
                "answer key",
                "answer_key",
                "answer",
                "correct",
            ],
            Self::Explanation => &[
                "explanation",
                "explanations",
                "answer explanation",
                "rationale",
                "feedback",
            ],
            Self::Domain => &["domain", "domains", "category", "subject"],
            Self::SubDomain => &[
                "sub domain",
                "sub_domain",
                "sub-domain",
                "subdomain",
                "subcategory",
            ],
            Self::Topic => &["topic", "topics"],
            Self::Chapter => &["chapter", "chapters"],
            Self::Heading => &["heading", "headings", "section"],
            Self::RowId => &["id", "row id", "row_id", "rowid", "_id"],
            Self::Hint1 => &["hint1", "hint 1", "hint_1", "hint"],
            Self::Hint2 => &["hint2", "hint 2", "hint_2"],
            Self::Hint3 => &["hint3", "hint 3", "hint_3"],
        }
    }
}

/// Ordered alias lists per canonical field.
///
/// The first alias (in list order) that names an existing column wins.
/// Hosts may deserialize a custom table to support house conventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasTable {
    entries: Vec<(CanonicalField, Vec<String>)>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self {
            entries: CanonicalField::ALL
                .iter()
                .map(|field| {
                    let aliases = field
                        .default_aliases()
                        .iter()
                        .map(|alias| (*alias).to_string())
                        .collect();
                    (*field, aliases)
                })
                .collect(),
        }
    }
}

impl AliasTable {
    /// Aliases for `field`, normalized for comparison.
    pub fn aliases(&self, field: CanonicalField) -> impl Iterator<Item = String> + '_ {
        self.entries
            .iter()
            .filter(move |(f, _)| *f == field)
            .flat_map(|(_, aliases)| aliases.iter().map(|a| normalize_column_name(a)))
    }

    /// Puts `alias` in front of the existing aliases for `field`.
    #[must_use]
    pub fn with_preferred_alias(mut self, field: CanonicalField, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some((_, aliases)) => aliases.insert(0, alias),
            None => self.entries.push((field, vec![alias])),
        }
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = CanonicalField> + '_ {
        self.entries.iter().map(|(field, _)| *field)
    }
}
