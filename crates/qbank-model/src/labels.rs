//! Pipe-delimited category label lists.

use serde::{Deserialize, Serialize};

/// Bucket name for questions without any domain label.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Zero or more category labels (`"Cardiology | Renal"`).
///
/// An empty list means the question is uncategorized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(Vec<String>);

impl Labels {
    /// Splits a raw cell on `|`, trimming each label and dropping empties.
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split('|')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l.eq_ignore_ascii_case(label.trim()))
    }

    /// Labels joined back with `|`, the canonical storage form.
    pub fn to_pipe_string(&self) -> String {
        self.0.join("|")
    }
}
