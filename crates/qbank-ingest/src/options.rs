//! Configuration options for ingestion.

use qbank_map::AliasTable;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Maximum size of a single source (500 MB default).
pub const MAX_SOURCE_BYTES: u64 = 500 * 1024 * 1024;

/// Default name of the canonical question table.
pub const DEFAULT_CANONICAL_TABLE: &str = "questions";

/// Options controlling how sources are read and merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    /// Sources larger than this fail with a per-source error.
    pub max_source_bytes: u64,

    /// Substitute four placeholder options when a row has neither text nor
    /// choices, so no question is stored without choices.
    pub placeholder_choices: bool,

    /// Name of the canonical table in staging and exported databases.
    pub canonical_table: String,

    /// Column aliases per canonical field.
    pub aliases: AliasTable,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_source_bytes: MAX_SOURCE_BYTES,
            placeholder_choices: true,
            canonical_table: DEFAULT_CANONICAL_TABLE.to_string(),
            aliases: AliasTable::default(),
        }
    }
}

impl IngestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from TOML; missing keys keep their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    #[must_use]
    pub fn with_max_source_bytes(mut self, max: u64) -> Self {
        self.max_source_bytes = max;
        self
    }

    #[must_use]
    pub fn with_placeholder_choices(mut self, enable: bool) -> Self {
        self.placeholder_choices = enable;
        self
    }

    #[must_use]
    pub fn with_aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let options = IngestOptions::from_toml_str("").expect("parse");
        assert_eq!(options, IngestOptions::default());
    }

    #[test]
    fn toml_overrides_selected_keys() {
        let options = IngestOptions::from_toml_str(
            "max_source_bytes = 1024\nplaceholder_choices = false\n",
        )
        .expect("parse");
        assert_eq!(options.max_source_bytes, 1024);
        assert!(!options.placeholder_choices);
        assert_eq!(options.canonical_table, DEFAULT_CANONICAL_TABLE);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(IngestOptions::from_toml_str("max_source_bytes = \"lots\"").is_err());
    }
}
