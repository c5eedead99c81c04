//! Utility functions for mapping operations.

/// Normalizes a column name for comparison by lowercasing, trimming and
/// collapsing internal whitespace.
///
/// Separators are kept, so `question_text` and `question text` stay distinct
/// and alias lists spell out both forms explicitly.
pub fn normalize_column_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_case() {
        assert_eq!(normalize_column_name("  Question   Text "), "question text");
        assert_eq!(normalize_column_name("Ref_ID"), "ref_id");
        assert_eq!(normalize_column_name(""), "");
    }
}
