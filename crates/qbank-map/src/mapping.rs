//! Column-to-field resolution for the selected table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aliases::{AliasTable, CanonicalField};
use crate::choice::{ChoiceColumn, detect_choice_column};
use crate::utils::normalize_column_name;

/// Result of mapping one table's columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap {
    /// Resolved source column per canonical field. Absent fields are unmapped.
    pub fields: BTreeMap<CanonicalField, String>,
    /// Choice columns in source order, one per key.
    pub choices: Vec<ChoiceColumn>,
    /// Columns that matched neither a field nor a choice pattern.
    pub unmapped_columns: Vec<String>,
}

impl FieldMap {
    /// Source column for `field`, if one was resolved.
    pub fn column(&self, field: CanonicalField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// True when neither question text nor reference id could be found, so
    /// every row would be rejected.
    pub fn lacks_identity(&self) -> bool {
        self.column(CanonicalField::QuestionText).is_none()
            && self.column(CanonicalField::RefId).is_none()
    }
}

/// Maps a table's column names onto canonical fields.
///
/// For each field the aliases are tried in order and the first one naming an
/// existing column (case-insensitive) wins. A column claimed by one field is
/// not offered to later fields. Remaining columns are tested as choice
/// columns; when two columns resolve to the same key the first is kept.
pub fn map_columns(columns: &[String], aliases: &AliasTable) -> FieldMap {
    let normalized: Vec<String> = columns.iter().map(|c| normalize_column_name(c)).collect();
    let mut claimed = vec![false; columns.len()];
    let mut map = FieldMap::default();

    for field in aliases.fields() {
        if map.fields.contains_key(&field) {
            continue;
        }
        let hit = aliases.aliases(field).find_map(|alias| {
            normalized
                .iter()
                .enumerate()
                .find(|(idx, name)| !claimed[*idx] && **name == alias)
                .map(|(idx, _)| idx)
        });
        if let Some(idx) = hit {
            claimed[idx] = true;
            debug!(?field, column = %columns[idx], "mapped column");
            map.fields.insert(field, columns[idx].clone());
        }
    }

    for (idx, column) in columns.iter().enumerate() {
        if claimed[idx] {
            continue;
        }
        match detect_choice_column(column) {
            Some(choice) if map.choices.iter().any(|c| c.key == choice.key) => {
                debug!(column = %column, key = %choice.key, "duplicate choice key ignored");
                map.unmapped_columns.push(column.clone());
            }
            Some(choice) => map.choices.push(choice),
            None => map.unmapped_columns.push(column.clone()),
        }
    }

    map
}
