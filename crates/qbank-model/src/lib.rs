//! Canonical question-bank data model.
//!
//! Every source file, whatever its column names, is normalized into
//! [`Question`] rows. The answer encoding is classified once into an
//! [`AnswerKey`] when a question is built, so downstream code never has to
//! guess what a raw answer string means.

pub mod answer;
pub mod choice;
pub mod dataset;
pub mod error;
pub mod labels;
pub mod question;
pub mod tags;

pub use answer::{AnswerKey, QuestionKind, multi_key_set};
pub use choice::{Choices, key_from_number, parse_choice_key};
pub use dataset::{Dataset, DatasetHandle};
pub use error::{ModelError, Result};
pub use labels::{Labels, UNCATEGORIZED};
pub use question::{Question, QuestionDraft};
pub use tags::{InlineTag, has_tag};
