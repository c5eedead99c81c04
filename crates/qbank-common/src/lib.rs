//! Shared utilities for the question-bank crates.
//!
//! - [`logging`]: `EnvFilter` for the question-bank targets and question-text
//!   redaction
//! - [`natural`]: numeric-aware string ordering used for reading order and
//!   matching-question display order

pub mod logging;
pub mod natural;

pub use logging::{env_filter, redact_text, set_log_text};
pub use natural::{natural_cmp, natural_sort};
