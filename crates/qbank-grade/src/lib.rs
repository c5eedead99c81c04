//! Answer semantics: matching configurations and correctness evaluation.
//!
//! Grading is strict and deterministic. There is no partial credit, and a
//! question whose answer key cannot be interpreted grades as incorrect
//! instead of failing.

pub mod evaluate;
pub mod matching;

pub use evaluate::{Response, is_correct};
pub use matching::{LINK_SEPARATOR, MatchConfiguration, link};
