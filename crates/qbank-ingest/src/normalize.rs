//! Answer and choice normalization for raw source rows.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use qbank_map::{CanonicalField, FieldMap};
use qbank_model::{Choices, Labels, QuestionDraft, key_from_number};
use regex::Regex;
use tracing::debug;

use crate::sqlite::CHOICES_JSON_COLUMN;

/// `Option:`, `Answer`, `The answer is:` at the start of an answer cell.
static ANSWER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:the answer is|answer|option)\s*:?\s*").expect("valid prefix pattern")
});

const QUOTES: [char; 2] = ['"', '\''];

/// True for answers that encode matching pairs and must keep their structure.
///
/// A literal two-character `\n` counts as a line break.
pub fn is_complex_answer(raw: &str) -> bool {
    raw.contains('\n')
        || raw.contains("\\n")
        || (raw.contains(',') && raw.chars().any(|c| c.is_ascii_digit()))
}

/// Cleans a raw correct-answer cell.
///
/// Complex (matching) answers only lose surrounding quotes. Simple answers
/// lose a leading `Option:`/`Answer:`/`The answer is:` prefix and a single
/// trailing `.` or `)`; a number in `1..=26` becomes its letter and
/// everything else is uppercased.
pub fn normalize_answer(raw: &str) -> String {
    if is_complex_answer(raw) {
        return raw.trim().trim_matches(QUOTES).to_string();
    }

    let stripped = ANSWER_PREFIX.replace(raw, "");
    let mut answer = stripped.trim();
    if let Some(rest) = answer
        .strip_suffix('.')
        .or_else(|| answer.strip_suffix(')'))
    {
        answer = rest.trim_end();
    }

    match answer.parse::<u32>().ok().and_then(key_from_number) {
        Some(letter) => letter.to_string(),
        None => answer.to_uppercase(),
    }
}

/// Trims a choice cell; empty cells yield `None`.
pub fn normalize_choice_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Column positions of a mapped table, resolved once per source.
#[derive(Debug, Clone, Default)]
pub struct RowLayout {
    fields: BTreeMap<CanonicalField, usize>,
    choices: Vec<(char, usize)>,
    /// JSON choice map of a previously exported canonical table.
    choices_json: Option<usize>,
}

impl RowLayout {
    pub fn new(columns: &[String], map: &FieldMap) -> Self {
        let position = |name: &str| columns.iter().position(|c| c == name);
        let fields = map
            .fields
            .iter()
            .filter_map(|(field, column)| position(column).map(|idx| (*field, idx)))
            .collect();
        let choices = map
            .choices
            .iter()
            .filter_map(|choice| position(&choice.column).map(|idx| (choice.key, idx)))
            .collect();
        Self {
            fields,
            choices,
            choices_json: position(CHOICES_JSON_COLUMN),
        }
    }

    fn exported_choices(&self, row: &[String]) -> Choices {
        let Some(raw) = self.choices_json.and_then(|idx| row.get(idx)) else {
            return Choices::new();
        };
        if raw.trim().is_empty() {
            return Choices::new();
        }
        serde_json::from_str(raw).unwrap_or_else(|error| {
            debug!(%error, "unreadable exported choices");
            Choices::new()
        })
    }

    fn cell<'a>(&self, row: &'a [String], field: CanonicalField) -> &'a str {
        self.fields
            .get(&field)
            .and_then(|&idx| row.get(idx))
            .map_or("", |value| value.as_str())
    }

    fn optional(&self, row: &[String], field: CanonicalField) -> Option<String> {
        normalize_choice_cell(self.cell(row, field))
    }
}

/// Normalizes one raw row into a draft question.
///
/// The id and source name are left for the caller; everything else comes
/// from the row. Never fails: unmapped or empty cells become empty values.
pub fn normalize_row(row: &[String], layout: &RowLayout, placeholder_choices: bool) -> QuestionDraft {
    let text = layout.cell(row, CanonicalField::QuestionText).trim().to_string();

    let mut choices = layout.exported_choices(row);
    for &(key, idx) in &layout.choices {
        if let Some(value) = row.get(idx).and_then(|raw| normalize_choice_cell(raw)) {
            choices.insert(key, value);
        }
    }
    if choices.is_empty() && text.is_empty() && placeholder_choices {
        choices = Choices::placeholder();
    }

    QuestionDraft {
        text,
        ref_id: layout.cell(row, CanonicalField::RefId).trim().to_string(),
        correct_answer: normalize_answer(layout.cell(row, CanonicalField::CorrectAnswer)),
        choices,
        explanation: layout.cell(row, CanonicalField::Explanation).trim().to_string(),
        domain: Labels::parse(layout.cell(row, CanonicalField::Domain)),
        sub_domain: Labels::parse(layout.cell(row, CanonicalField::SubDomain)),
        topic: Labels::parse(layout.cell(row, CanonicalField::Topic)),
        chapter: Labels::parse(layout.cell(row, CanonicalField::Chapter)),
        heading: Labels::parse(layout.cell(row, CanonicalField::Heading)),
        hint1: layout.optional(row, CanonicalField::Hint1),
        hint2: layout.optional(row, CanonicalField::Hint2),
        hint3: layout.optional(row, CanonicalField::Hint3),
        ..QuestionDraft::default()
    }
}

/// Raw row id, if the row has a usable one.
pub fn raw_row_id(row: &[String], layout: &RowLayout) -> Option<String> {
    normalize_choice_cell(layout.cell(row, CanonicalField::RowId))
}

#[cfg(test)]
mod tests {
    use qbank_map::{AliasTable, map_columns};

    use super::*;

    #[test]
    fn numeric_answer_becomes_letter() {
        assert_eq!(normalize_answer("1"), "A");
        assert_eq!(normalize_answer(" 3 "), "C");
        assert_eq!(normalize_answer("26"), "Z");
        assert_eq!(normalize_answer("27"), "27");
    }

    #[test]
    fn prefixes_and_trailing_marks_are_stripped() {
        assert_eq!(normalize_answer("Option: b"), "B");
        assert_eq!(normalize_answer("answer c."), "C");
        assert_eq!(normalize_answer("The answer is: 2)"), "B");
        assert_eq!(normalize_answer("d)"), "D");
    }

    #[test]
    fn only_one_trailing_mark_is_removed() {
        assert_eq!(normalize_answer("a.."), "A.");
    }

    #[test]
    fn simple_lists_are_uppercased() {
        assert_eq!(normalize_answer("a,c"), "A,C");
    }

    #[test]
    fn complex_answers_keep_structure() {
        assert_eq!(normalize_answer("\"A,1\n C,2\""), "A,1\n C,2");
        assert_eq!(normalize_answer("'a,1'"), "a,1");
        assert!(is_complex_answer("A,1"));
        assert!(!is_complex_answer("A,C"));
    }

    #[test]
    fn literal_line_break_keeps_matching_answer() {
        assert!(is_complex_answer(r"A,C\nB,D"));
        assert_eq!(normalize_answer(r"A,C\nB,D"), r"A,C\nB,D");
    }

    #[test]
    fn exported_choice_json_is_read_back() {
        let (_, layout) = layout(&["id", "text", "correct_answer", "choices_json"]);
        let draft = normalize_row(
            &row(&["s_1", "Capital?", "B", r#"{"A":"Rome","B":"Paris"}"#]),
            &layout,
            true,
        );
        assert_eq!(draft.choices.get('A'), Some("Rome"));
        assert_eq!(draft.choices.get('B'), Some("Paris"));

        let broken = normalize_row(&row(&["s_2", "Capital?", "B", "{not json"]), &layout, true);
        assert!(broken.choices.is_empty());
    }

    #[test]
    fn choice_cells_are_trimmed() {
        assert_eq!(normalize_choice_cell("  Paris "), Some("Paris".to_string()));
        assert_eq!(normalize_choice_cell("   "), None);
    }

    fn layout(columns: &[&str]) -> (Vec<String>, RowLayout) {
        let columns: Vec<String> = columns.iter().map(|c| (*c).to_string()).collect();
        let map = map_columns(&columns, &AliasTable::default());
        let layout = RowLayout::new(&columns, &map);
        (columns, layout)
    }

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn row_is_normalized() {
        let (_, layout) = layout(&["id", "Question", "Answer", "1", "2", "3", "Domain", "Hint 1"]);
        let draft = normalize_row(
            &row(&["7", " Capital? ", "2", "Rome", "Paris", "  ", "Geo | EU", "France"]),
            &layout,
            true,
        );
        assert_eq!(draft.text, "Capital?");
        assert_eq!(draft.correct_answer, "B");
        assert_eq!(draft.choices.len(), 2);
        assert_eq!(draft.choices.get('B'), Some("Paris"));
        assert!(!draft.choices.contains_key('C'));
        assert_eq!(draft.domain.to_pipe_string(), "Geo|EU");
        assert_eq!(draft.hint1.as_deref(), Some("France"));
        assert_eq!(raw_row_id(&row(&["7"]), &layout), Some("7".to_string()));
    }

    #[test]
    fn placeholder_only_without_text_and_choices() {
        let (_, layout) = layout(&["Question", "Ref", "A", "B"]);
        let blank = normalize_row(&row(&["", "B1_C1_Q1", "", ""]), &layout, true);
        assert_eq!(blank.choices.len(), 4);
        assert_eq!(blank.choices.get('A'), Some("Option A"));

        let with_text = normalize_row(&row(&["Why?", "", "", ""]), &layout, true);
        assert!(with_text.choices.is_empty());

        let disabled = normalize_row(&row(&["", "B1_C1_Q1", "", ""]), &layout, false);
        assert!(disabled.choices.is_empty());
    }

    #[test]
    fn short_rows_do_not_panic() {
        let (_, layout) = layout(&["Question", "Answer", "A"]);
        let draft = normalize_row(&row(&["Only text"]), &layout, true);
        assert_eq!(draft.text, "Only text");
        assert_eq!(draft.correct_answer, "");
    }
}
