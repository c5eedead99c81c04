//! Choice column detection.

use std::sync::LazyLock;

use qbank_model::parse_choice_key;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// `A`, `b`, `3`, `ChoiceA`, `choice_b`, `Choice 12`.
static CHOICE_COLUMN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:choice[ _]?)?([a-z]|[0-9]{1,2})\s*$").expect("valid choice pattern")
});

/// A source column holding one answer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceColumn {
    /// Column name as it appears in the source.
    pub column: String,
    /// Canonical uppercase key (`"2"` and `"Choice B"` both give `B`).
    pub key: char,
}

/// Returns the canonical key if `column` names a choice column.
///
/// Numeric suffixes `1..=26` remap to `A..=Z`; anything else is not a choice.
pub fn detect_choice_column(column: &str) -> Option<ChoiceColumn> {
    let captures = CHOICE_COLUMN.captures(column)?;
    let key = parse_choice_key(captures.get(1)?.as_str()).ok()?;
    Some(ChoiceColumn {
        column: column.to_string(),
        key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(column: &str) -> Option<char> {
        detect_choice_column(column).map(|c| c.key)
    }

    #[test]
    fn letters_with_and_without_prefix() {
        assert_eq!(key("A"), Some('A'));
        assert_eq!(key("choice_b"), Some('B'));
        assert_eq!(key("ChoiceC"), Some('C'));
        assert_eq!(key("Choice d"), Some('D'));
    }

    #[test]
    fn digits_remap_to_letters() {
        assert_eq!(key("2"), Some('B'));
        assert_eq!(key("choice 3"), Some('C'));
        assert_eq!(key("Choice_26"), Some('Z'));
    }

    #[test]
    fn numeric_and_named_forms_agree() {
        assert_eq!(key("2"), key("Choice B"));
    }

    #[test]
    fn other_columns_are_not_choices() {
        assert_eq!(key("Answer"), None);
        assert_eq!(key("0"), None);
        assert_eq!(key("27"), None);
        assert_eq!(key("choice"), None);
        assert_eq!(key(""), None);
    }
}
