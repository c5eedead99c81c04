//! Inline type tags carried in question text.

use serde::{Deserialize, Serialize};

/// A marker embedded in question text that changes how the question is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineTag {
    /// Answer is a set of left/right pairings.
    Matching,
    /// More than one choice is correct.
    MultiSelect,
    /// The question refers to an image.
    Image,
}

impl InlineTag {
    /// Lowercase markers recognized for this tag.
    pub fn markers(self) -> &'static [&'static str] {
        match self {
            Self::Matching => &["[matching]", "(matching)"],
            Self::MultiSelect => &[
                "[multi]",
                "[multiple]",
                "[multi-select]",
                "select all that apply",
            ],
            Self::Image => &["[image]", "[img]", "<img"],
        }
    }
}

/// Returns true if `text` carries `tag` (case-insensitive).
pub fn has_tag(text: &str, tag: InlineTag) -> bool {
    if text.is_empty() {
        return false;
    }
    let lowered = text.to_lowercase();
    tag.markers().iter().any(|marker| lowered.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_tags_case_insensitively() {
        assert!(has_tag("[Matching] Pair the terms", InlineTag::Matching));
        assert!(has_tag("Which are prime? SELECT ALL THAT APPLY", InlineTag::MultiSelect));
        assert!(has_tag("See figure <IMG src='a.png'>", InlineTag::Image));
    }

    #[test]
    fn plain_text_has_no_tags() {
        let text = "What is the capital of France?";
        assert!(!has_tag(text, InlineTag::Matching));
        assert!(!has_tag(text, InlineTag::MultiSelect));
        assert!(!has_tag(text, InlineTag::Image));
        assert!(!has_tag("", InlineTag::Image));
    }
}
