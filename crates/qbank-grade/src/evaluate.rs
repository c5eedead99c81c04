//! Strict correctness evaluation.

use std::collections::BTreeSet;

use qbank_model::{AnswerKey, Question};
use serde::{Deserialize, Serialize};

use crate::matching::MatchConfiguration;

/// A submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Response {
    /// One choice key.
    Key(String),
    /// Selected choice keys of a multi-select question.
    Keys(Vec<String>),
    /// `"<left text>||<right key>"` links of a matching question.
    Links(Vec<String>),
}

impl Response {
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }

    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Keys(keys.into_iter().map(Into::into).collect())
    }

    pub fn links<I, S>(links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Links(links.into_iter().map(Into::into).collect())
    }

    fn items(&self) -> &[String] {
        match self {
            Self::Key(key) => std::slice::from_ref(key),
            Self::Keys(items) | Self::Links(items) => items,
        }
    }
}

/// Grades `response` against `question`.
///
/// - matching: the submitted links must equal the correct link set exactly;
///   an unresolvable configuration never grades correct
/// - multi-select: the submitted keys (trimmed, uppercased) must equal the
///   correct key set
/// - single choice: the one submitted key must equal the correct key
///
/// A missing response, or a question without a correct answer, is
/// incorrect. Order never matters.
pub fn is_correct(question: &Question, response: Option<&Response>) -> bool {
    let Some(response) = response else {
        return false;
    };

    match &question.answer {
        AnswerKey::Matching(_) => {
            let config = MatchConfiguration::from_question(question);
            if !config.is_valid {
                return false;
            }
            let submitted: BTreeSet<&str> = response.items().iter().map(String::as_str).collect();
            submitted.len() == config.correct_links.len()
                && config
                    .correct_links
                    .iter()
                    .all(|link| submitted.contains(link.as_str()))
        }
        AnswerKey::MultiChoice(expected) => {
            let submitted: BTreeSet<String> = response
                .items()
                .iter()
                .map(|key| key.trim().to_uppercase())
                .filter(|key| !key.is_empty())
                .collect();
            !expected.is_empty() && submitted == *expected
        }
        AnswerKey::SingleChoice(expected) => match response.items() {
            [key] => !expected.is_empty() && key == expected,
            _ => false,
        },
    }
}
