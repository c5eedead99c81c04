//! Log filtering and question-text redaction.
//!
//! The library crates only emit `tracing` events; installing a subscriber is
//! up to the host, which can build its filter with [`env_filter`].
//!
//! # Log Levels
//!
//! - `error`: merge failures
//! - `warn`: skipped sources
//! - `info`: per-source and per-merge summaries
//! - `debug`: table selection and column mapping decisions
//! - `trace`: row-level content (question text is redacted unless
//!   [`set_log_text`] enabled it)

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::Level;
use tracing_subscriber::EnvFilter;

static LOG_TEXT_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when question content logging is disabled.
pub const REDACTED_TEXT: &str = "[REDACTED]";

/// Targets of the question-bank crates.
const TARGETS: [&str; 6] = [
    "qbank_common",
    "qbank_grade",
    "qbank_ingest",
    "qbank_map",
    "qbank_model",
    "qbank_query",
];

/// Allows or forbids question text, answers and choices in trace events.
pub fn set_log_text(enabled: bool) {
    LOG_TEXT_ENABLED.store(enabled, Ordering::Release);
}

pub fn log_text_enabled() -> bool {
    LOG_TEXT_ENABLED.load(Ordering::Acquire)
}

/// Returns the input when content logging is enabled, otherwise a redacted token.
pub fn redact_text(value: &str) -> &str {
    redact_if(!log_text_enabled(), value)
}

fn redact_if(redact: bool, value: &str) -> &str {
    if redact { REDACTED_TEXT } else { value }
}

/// Filter for the question-bank targets at `level`.
///
/// `RUST_LOG` wins when set; other crates stay at `warn`.
pub fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)))
}

fn directives(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    std::iter::once("warn".to_string())
        .chain(TARGETS.iter().map(|target| format!("{target}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_every_crate() {
        let directives = directives(Level::DEBUG);
        assert!(directives.starts_with("warn,"));
        for target in TARGETS {
            assert!(directives.contains(&format!("{target}=debug")), "{target}");
        }
    }

    #[test]
    fn redaction_follows_flag() {
        assert_eq!(redact_if(true, "What is 2+2?"), REDACTED_TEXT);
        assert_eq!(redact_if(false, "What is 2+2?"), "What is 2+2?");

        set_log_text(true);
        assert_eq!(redact_text("What is 2+2?"), "What is 2+2?");
        set_log_text(false);
        assert_eq!(redact_text("What is 2+2?"), REDACTED_TEXT);
    }
}
