//! Answer-key classification.
//!
//! The raw correct-answer cell means different things per question type. It is
//! classified exactly once, when a [`crate::Question`] is built.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::choice::{Choices, key_from_number};
use crate::tags::{InlineTag, has_tag};

/// Question type as derived from its text and answer key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    SingleChoice,
    MultiChoice,
    Matching,
}

impl QuestionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SingleChoice => "single_choice",
            Self::MultiChoice => "multi_choice",
            Self::Matching => "matching",
        }
    }
}

/// The canonical correct answer of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnswerKey {
    /// One key, compared by exact string equality.
    SingleChoice(String),
    /// Every key in the set must be selected, and nothing else.
    MultiChoice(BTreeSet<String>),
    /// Raw paired-identifier text; resolved against the choices on demand.
    Matching(String),
}

impl AnswerKey {
    /// Classifies a normalized answer string.
    ///
    /// - matching when the text carries a matching tag
    /// - multi-select when the text carries a multi-select tag, the answer
    ///   contains a comma, or the answer is longer than one character and
    ///   every character is a known choice key
    /// - single choice otherwise
    ///
    /// The "every character is a key" rule can misread a multi-character
    /// single answer such as `"AB"` when both `A` and `B` exist; it is kept
    /// for compatibility with existing banks.
    pub fn classify(text: &str, correct_answer: &str, choices: &Choices) -> Self {
        if has_tag(text, InlineTag::Matching) {
            return Self::Matching(correct_answer.to_string());
        }

        let answer = correct_answer.trim();
        let tagged_multi = has_tag(text, InlineTag::MultiSelect);
        let has_comma = answer.contains(',');
        let all_keys = answer.chars().count() > 1
            && answer
                .chars()
                .all(|c| choices.contains_key(c.to_ascii_uppercase()));

        if tagged_multi || has_comma || all_keys {
            Self::MultiChoice(multi_key_set(answer))
        } else {
            Self::SingleChoice(answer.to_string())
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::SingleChoice(_) => QuestionKind::SingleChoice,
            Self::MultiChoice(_) => QuestionKind::MultiChoice,
            Self::Matching(_) => QuestionKind::Matching,
        }
    }
}

/// Splits a multi-select answer into its key set.
///
/// A comma list yields its trimmed, uppercased items, with numbers in
/// `1..=26` remapped to their letter keys; otherwise every non-whitespace
/// character is one key.
pub fn multi_key_set(answer: &str) -> BTreeSet<String> {
    if answer.contains(',') {
        answer
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| match part.parse::<u32>().ok().and_then(key_from_number) {
                Some(letter) => letter.to_string(),
                None => part.to_uppercase(),
            })
            .collect()
    } else {
        answer
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_uppercase().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_choices() -> Choices {
        ['A', 'B', 'C', 'D']
            .into_iter()
            .map(|k| (k, format!("option {k}")))
            .collect()
    }

    fn set(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|k| (*k).to_string()).collect()
    }

    #[test]
    fn single_letter_is_single_choice() {
        let key = AnswerKey::classify("Capital of France?", "B", &four_choices());
        assert_eq!(key, AnswerKey::SingleChoice("B".to_string()));
        assert_eq!(key.kind(), QuestionKind::SingleChoice);
    }

    #[test]
    fn comma_list_is_multi_choice() {
        let key = AnswerKey::classify("Pick the primes", "A,C", &four_choices());
        assert_eq!(key, AnswerKey::MultiChoice(set(&["A", "C"])));
    }

    #[test]
    fn concatenated_keys_are_multi_choice() {
        let key = AnswerKey::classify("Pick the primes", "AC", &four_choices());
        assert_eq!(key, AnswerKey::MultiChoice(set(&["A", "C"])));
    }

    #[test]
    fn unknown_characters_stay_single() {
        let key = AnswerKey::classify("Spell it", "AZ", &four_choices());
        assert_eq!(key, AnswerKey::SingleChoice("AZ".to_string()));
    }

    #[test]
    fn multi_tag_forces_multi_choice() {
        let key = AnswerKey::classify("[multi] Pick all", "B", &four_choices());
        assert_eq!(key, AnswerKey::MultiChoice(set(&["B"])));
    }

    #[test]
    fn matching_tag_keeps_raw_answer() {
        let key = AnswerKey::classify("[Matching] Pair them", "A,1\nC,2", &four_choices());
        assert_eq!(key, AnswerKey::Matching("A,1\nC,2".to_string()));
        assert_eq!(key.kind(), QuestionKind::Matching);
    }

    #[test]
    fn multi_key_set_trims_items() {
        assert_eq!(multi_key_set(" a , c ,"), set(&["A", "C"]));
        assert_eq!(multi_key_set("bd"), set(&["B", "D"]));
    }

    #[test]
    fn numeric_comma_list_maps_to_letters() {
        assert_eq!(multi_key_set("1, 3"), set(&["A", "C"]));
        assert_eq!(multi_key_set("2,27"), set(&["B", "27"]));

        let key = AnswerKey::classify("Pick the primes", "1,3", &four_choices());
        assert_eq!(key, AnswerKey::MultiChoice(set(&["A", "C"])));
    }
}
