//! Answer options keyed by a single character.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Number of letters available for numeric key remapping (1 -> A ... 26 -> Z).
pub const MAX_NUMERIC_KEY: u32 = 26;

/// Converts a 1-based option number to its letter key.
///
/// Returns `None` outside `1..=26`.
pub fn key_from_number(number: u32) -> Option<char> {
    if (1..=MAX_NUMERIC_KEY).contains(&number) {
        char::from_u32('A' as u32 + number - 1)
    } else {
        None
    }
}

/// Parses a raw key (`"b"`, `"B"`, `"2"`, `" 12 "`) into its canonical letter.
pub fn parse_choice_key(raw: &str) -> Result<char> {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_uppercase()),
        _ => trimmed
            .parse::<u32>()
            .ok()
            .and_then(key_from_number)
            .ok_or_else(|| ModelError::InvalidChoiceKey(raw.to_string())),
    }
}

/// Ordered mapping from choice key to option text.
///
/// Keys are unique uppercase letters; empty option text is never stored.
/// Deserialized maps go through the same checks as [`Choices::insert`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<char, String>", into = "BTreeMap<char, String>")]
pub struct Choices(BTreeMap<char, String>);

impl Choices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Four generic options, used when a row carries neither text nor choices.
    pub fn placeholder() -> Self {
        let mut choices = Self::new();
        for key in ['A', 'B', 'C', 'D'] {
            choices.insert(key, format!("Option {key}"));
        }
        choices
    }

    /// Inserts an option after trimming its text.
    ///
    /// Lowercase keys are uppercased. Returns false (and stores nothing) when
    /// the key is not an ASCII letter or the trimmed text is empty.
    pub fn insert(&mut self, key: char, text: impl AsRef<str>) -> bool {
        let text = text.as_ref().trim();
        if !key.is_ascii_alphabetic() || text.is_empty() {
            return false;
        }
        self.0.insert(key.to_ascii_uppercase(), text.to_string());
        true
    }

    pub fn get(&self, key: char) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn contains_key(&self, key: char) -> bool {
        self.0.contains_key(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = char> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.0.iter().map(|(key, text)| (*key, text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<char, String>> for Choices {
    fn from(map: BTreeMap<char, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<Choices> for BTreeMap<char, String> {
    fn from(choices: Choices) -> Self {
        choices.0
    }
}

impl FromIterator<(char, String)> for Choices {
    fn from_iter<I: IntoIterator<Item = (char, String)>>(iter: I) -> Self {
        let mut choices = Self::new();
        for (key, text) in iter {
            choices.insert(key, text);
        }
        choices
    }
}
