//! The canonical question row.

use serde::{Deserialize, Serialize};

use crate::answer::{AnswerKey, QuestionKind};
use crate::choice::Choices;
use crate::labels::Labels;
use crate::tags::{InlineTag, has_tag};

/// One normalized question.
///
/// Built through [`QuestionDraft::build`], which derives [`Question::answer`]
/// from the text, raw answer and choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Globally unique id: `<source id>_<raw row id>`.
    pub id: String,
    /// Display name of the file the row came from.
    pub source_file: String,
    /// Question text, possibly carrying inline tags.
    pub text: String,
    /// Structured `book_chapter_question` locator; empty when absent.
    pub ref_id: String,
    /// Normalized answer cell as stored.
    pub correct_answer: String,
    pub choices: Choices,
    pub explanation: String,
    pub domain: Labels,
    pub sub_domain: Labels,
    pub topic: Labels,
    pub chapter: Labels,
    pub heading: Labels,
    pub hint1: Option<String>,
    pub hint2: Option<String>,
    pub hint3: Option<String>,
    /// Classified answer key.
    pub answer: AnswerKey,
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        self.answer.kind()
    }

    pub fn is_matching(&self) -> bool {
        self.kind() == QuestionKind::Matching
    }

    pub fn is_multi_choice(&self) -> bool {
        self.kind() == QuestionKind::MultiChoice
    }

    pub fn is_image_flagged(&self) -> bool {
        has_tag(&self.text, InlineTag::Image)
    }

    /// Hints in order, skipping absent ones.
    pub fn hints(&self) -> impl Iterator<Item = &str> {
        [&self.hint1, &self.hint2, &self.hint3]
            .into_iter()
            .filter_map(|hint| hint.as_deref())
    }
}

/// Mutable staging form of a [`Question`].
#[derive(Debug, Clone, Default)]
pub struct QuestionDraft {
    pub id: String,
    pub source_file: String,
    pub text: String,
    pub ref_id: String,
    pub correct_answer: String,
    pub choices: Choices,
    pub explanation: String,
    pub domain: Labels,
    pub sub_domain: Labels,
    pub topic: Labels,
    pub chapter: Labels,
    pub heading: Labels,
    pub hint1: Option<String>,
    pub hint2: Option<String>,
    pub hint3: Option<String>,
}

impl QuestionDraft {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_answer(mut self, correct_answer: impl Into<String>) -> Self {
        self.correct_answer = correct_answer.into();
        self
    }

    #[must_use]
    pub fn with_choice(mut self, key: char, text: impl AsRef<str>) -> Self {
        self.choices.insert(key, text);
        self
    }

    #[must_use]
    pub fn with_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = ref_id.into();
        self
    }

    #[must_use]
    pub fn with_source_file(mut self, source_file: impl Into<String>) -> Self {
        self.source_file = source_file.into();
        self
    }

    #[must_use]
    pub fn with_domain(mut self, raw: &str) -> Self {
        self.domain = Labels::parse(raw);
        self
    }

    /// True when the row has neither text nor a reference id.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty() && self.ref_id.trim().is_empty()
    }

    /// Classifies the answer key and freezes the row.
    pub fn build(self) -> Question {
        let answer = AnswerKey::classify(&self.text, &self.correct_answer, &self.choices);
        Question {
            id: self.id,
            source_file: self.source_file,
            text: self.text,
            ref_id: self.ref_id,
            correct_answer: self.correct_answer,
            choices: self.choices,
            explanation: self.explanation,
            domain: self.domain,
            sub_domain: self.sub_domain,
            topic: self.topic,
            chapter: self.chapter,
            heading: self.heading,
            hint1: self.hint1,
            hint2: self.hint2,
            hint3: self.hint3,
            answer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_classifies_answer() {
        let question = QuestionDraft::new("src_1", "Pick two")
            .with_choice('A', "x")
            .with_choice('B', "y")
            .with_choice('C', "z")
            .with_answer("A,C")
            .build();
        assert!(question.is_multi_choice());
        assert!(!question.is_matching());
    }

    #[test]
    fn blank_requires_both_text_and_ref_empty() {
        assert!(QuestionDraft::new("x", "  ").is_blank());
        assert!(!QuestionDraft::new("x", "").with_ref_id("B1_C1_Q1").is_blank());
        assert!(!QuestionDraft::new("x", "text").is_blank());
    }

    #[test]
    fn hints_skip_missing() {
        let mut draft = QuestionDraft::new("x", "q");
        draft.hint1 = Some("first".to_string());
        draft.hint3 = Some("third".to_string());
        let question = draft.build();
        assert_eq!(question.hints().collect::<Vec<_>>(), vec!["first", "third"]);
    }

    #[test]
    fn image_flag_comes_from_text() {
        let question = QuestionDraft::new("x", "[IMG] Identify the organ").build();
        assert!(question.is_image_flagged());
    }
}
