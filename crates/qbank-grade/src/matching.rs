//! Matching-question configuration.
//!
//! A matching question stores its pairs as free text in the answer cell, one
//! pair per line (`A,1`). Each side names a choice by its identifier: the
//! enumerator a choice text starts with (`"A. apple"`, `"1) red"`), or the
//! choice key when the text has none.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use qbank_common::natural_sort;
use qbank_model::{AnswerKey, Question};
use regex::Regex;
use serde::Serialize;
use tracing::trace;

/// Leading `A.`, `b)`, `1.` enumerator of a choice text. The mark must be
/// followed by whitespace, so `3.14` or `e.g.` stay plain text.
static ENUMERATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z0-9])[.)](?:\s+|$)").expect("valid enumerator pattern")
});

/// Separator between the left text and right key of a link.
pub const LINK_SEPARATOR: &str = "||";

const QUOTES: [char; 2] = ['"', '\''];

/// Builds one link string: `"<left text>||<right key>"`.
pub fn link(left_text: &str, right_key: char) -> String {
    format!("{left_text}{LINK_SEPARATOR}{right_key}")
}

/// Display form and answer key of a matching question.
///
/// Derived from a [`Question`] on demand; never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchConfiguration {
    /// Left-side texts, enumerators stripped, in natural identifier order.
    pub left_items: Vec<String>,
    /// Right-side choice keys in natural identifier order.
    pub right_choices: Vec<String>,
    /// Every acceptable link.
    pub correct_links: BTreeSet<String>,
    /// False when no pair in the answer resolved to choices.
    pub is_valid: bool,
}

#[derive(Debug)]
struct Member<'a> {
    key: char,
    display: &'a str,
}

impl MatchConfiguration {
    /// Resolves the answer pairs of `question` against its choices.
    ///
    /// Lines that do not name two known identifiers are dropped; when none
    /// remain the configuration is invalid rather than an error.
    pub fn from_question(question: &Question) -> Self {
        let raw = match &question.answer {
            AnswerKey::Matching(raw) => raw.as_str(),
            _ => question.correct_answer.as_str(),
        };

        let mut groups: BTreeMap<String, Vec<Member<'_>>> = BTreeMap::new();
        for (key, text) in question.choices.iter() {
            let (identifier, display) = identify(key, text);
            groups
                .entry(identifier)
                .or_default()
                .push(Member { key, display });
        }

        let mut left_ids = BTreeSet::new();
        let mut right_ids = BTreeSet::new();
        let mut correct_links = BTreeSet::new();
        for (left, right) in parse_pairs(raw) {
            let (Some(left_group), Some(right_group)) = (groups.get(&left), groups.get(&right))
            else {
                trace!(question = %question.id, %left, %right, "unresolved matching pair");
                continue;
            };
            for l in left_group {
                for r in right_group {
                    correct_links.insert(link(l.display, r.key));
                }
            }
            left_ids.insert(left);
            right_ids.insert(right);
        }

        let left_ids = natural_order(left_ids);
        let right_ids = natural_order(right_ids);

        Self {
            left_items: members(&groups, &left_ids)
                .into_iter()
                .map(|m| m.display.to_string())
                .collect(),
            right_choices: members(&groups, &right_ids)
                .into_iter()
                .map(|m| m.key.to_string())
                .collect(),
            is_valid: !correct_links.is_empty(),
            correct_links,
        }
    }
}

/// Identifier and display text of one choice.
fn identify(key: char, text: &str) -> (String, &str) {
    if let Some(caps) = ENUMERATOR.captures(text) {
        let rest = text[caps[0].len()..].trim();
        if !rest.is_empty() {
            return (caps[1].to_uppercase(), rest);
        }
    }
    (key.to_uppercase().to_string(), text.trim())
}

/// Parses answer lines into `(left, right)` identifier pairs.
///
/// Lines split on literal `\n` (either case) as well as real line breaks. A
/// line with more than two parts pairs its first identifier with each of the
/// others.
fn parse_pairs(raw: &str) -> Vec<(String, String)> {
    raw.replace("\\n", "\n")
        .replace("\\N", "\n")
        .split(['\n', '\r'])
        .flat_map(|line| {
            let ids: Vec<String> = line.split(',').filter_map(identifier).collect();
            let first = ids.first().cloned();
            ids.into_iter()
                .skip(1)
                .filter_map(move |right| first.clone().map(|left| (left, right)))
        })
        .collect()
}

/// Normalized first character of one answer part.
fn identifier(part: &str) -> Option<String> {
    let normalized = part.trim().trim_matches(QUOTES).trim().to_uppercase();
    normalized.chars().next().map(String::from)
}

/// Members of the groups named by `ids`, group by group.
fn members<'g, 'a>(
    groups: &'g BTreeMap<String, Vec<Member<'a>>>,
    ids: &[String],
) -> Vec<&'g Member<'a>> {
    ids.iter().filter_map(|id| groups.get(id)).flatten().collect()
}

fn natural_order(ids: BTreeSet<String>) -> Vec<String> {
    let mut ids: Vec<String> = ids.into_iter().collect();
    natural_sort(&mut ids);
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbank_model::QuestionDraft;

    fn matching(answer: &str, choices: &[(char, &str)]) -> Question {
        choices
            .iter()
            .fold(
                QuestionDraft::new("m1", "[matching] Pair them").with_answer(answer),
                |draft, (key, text)| draft.with_choice(*key, text),
            )
            .build()
    }

    fn links(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn pairs_resolve_by_choice_key() {
        let question = matching(
            "A,1\n C,2",
            &[('A', "x"), ('B', "y"), ('C', "z"), ('D', "1. p"), ('E', "2. q")],
        );
        let config = MatchConfiguration::from_question(&question);
        assert!(config.is_valid);
        assert_eq!(config.left_items, ["x", "z"]);
        assert_eq!(config.right_choices, ["D", "E"]);
        assert_eq!(config.correct_links, links(&["x||D", "z||E"]));
    }

    #[test]
    fn pairs_resolve_by_enumerator() {
        let question = matching(
            "\"a, 2\"\\nB,1",
            &[
                ('A', "A. apple"),
                ('B', "B) banana"),
                ('C', "1. red"),
                ('D', "2. yellow"),
            ],
        );
        let config = MatchConfiguration::from_question(&question);
        assert_eq!(config.left_items, ["apple", "banana"]);
        assert_eq!(config.right_choices, ["C", "D"]);
        assert_eq!(config.correct_links, links(&["apple||D", "banana||C"]));
    }

    #[test]
    fn shared_identifiers_form_cartesian_product() {
        let question = matching(
            "A,1",
            &[('A', "A. first"), ('B', "A. second"), ('C', "1. one"), ('D', "1. uno")],
        );
        let config = MatchConfiguration::from_question(&question);
        assert_eq!(config.left_items, ["first", "second"]);
        assert_eq!(config.correct_links.len(), 4);
        assert!(config.correct_links.contains("second||D"));
    }

    #[test]
    fn long_lines_pair_first_with_rest() {
        let question = matching("A,1,2", &[('A', "x"), ('B', "1. p"), ('C', "2. q")]);
        let config = MatchConfiguration::from_question(&question);
        assert_eq!(config.correct_links, links(&["x||B", "x||C"]));
    }

    #[test]
    fn unresolved_pairs_are_dropped() {
        let question = matching("A,1\nZ,9\njunk", &[('A', "x"), ('B', "1. p")]);
        let config = MatchConfiguration::from_question(&question);
        assert!(config.is_valid);
        assert_eq!(config.correct_links, links(&["x||B"]));

        let invalid = matching("Z,9", &[('A', "x"), ('B', "1. p")]);
        let config = MatchConfiguration::from_question(&invalid);
        assert!(!config.is_valid);
        assert!(config.correct_links.is_empty());
        assert!(config.left_items.is_empty());
    }

    #[test]
    fn display_order_ignores_line_order() {
        let question = matching(
            "B,1\nA,2",
            &[('A', "x"), ('B', "y"), ('C', "1. p"), ('D', "2. q")],
        );
        let config = MatchConfiguration::from_question(&question);
        assert_eq!(config.left_items, ["x", "y"]);
        assert_eq!(config.right_choices, ["C", "D"]);
        assert_eq!(config.correct_links, links(&["y||C", "x||D"]));
    }

    #[test]
    fn decimal_choice_text_is_not_an_enumerator() {
        let question = matching(
            "A,1\nB,2",
            &[('A', "3.14"), ('B', "2.71"), ('C', "1. pi"), ('D', "2. e")],
        );
        let config = MatchConfiguration::from_question(&question);
        assert!(config.is_valid);
        assert_eq!(config.left_items, ["3.14", "2.71"]);
        assert_eq!(config.right_choices, ["C", "D"]);
        assert_eq!(config.correct_links, links(&["3.14||C", "2.71||D"]));

        assert_eq!(identify('E', "e.g. foo"), ("E".to_string(), "e.g. foo"));
        assert_eq!(identify('F', "B."), ("F".to_string(), "B."));
    }

    #[test]
    fn uppercased_literal_line_break_still_splits() {
        let choices = [('A', "x"), ('B', "y"), ('C', "c"), ('D', "d")];
        for answer in [r"A,C\nB,D", r"A,C\NB,D"] {
            let config = MatchConfiguration::from_question(&matching(answer, &choices));
            assert_eq!(config.correct_links, links(&["x||C", "y||D"]), "{answer}");
        }
    }
}
