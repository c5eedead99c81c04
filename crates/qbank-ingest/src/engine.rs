//! The merge engine: every source into one canonical dataset.

use std::collections::HashSet;
use std::time::Instant;

use qbank_common::redact_text;
use qbank_map::{map_columns, select_table};
use qbank_model::{DatasetHandle, Question};
use serde::Serialize;
use tracing::{debug, info, info_span, trace, warn};
use uuid::Uuid;

use crate::error::{IngestError, Result};
use crate::normalize::{RowLayout, normalize_row, raw_row_id};
use crate::options::IngestOptions;
use crate::source::SourceFile;
use crate::sqlite::{CanonicalStore, SourceDatabase};

/// What happened to one source during a merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub source_id: String,
    pub display_name: String,
    /// Table the rows were read from, once one was selected.
    pub table: Option<String>,
    /// Rows committed to the canonical table.
    pub imported: usize,
    /// Rows dropped for having neither text nor a reference id.
    pub skipped: usize,
    /// Why the source was skipped entirely.
    pub error: Option<String>,
}

impl SourceReport {
    fn new(source: &SourceFile) -> Self {
        Self {
            source_id: source.id.clone(),
            display_name: source.display_name.clone(),
            table: None,
            imported: 0,
            skipped: 0,
            error: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of a completed merge.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Total rows imported across all sources.
    pub imported: usize,
    /// The new canonical dataset.
    pub dataset: DatasetHandle,
    /// One report per source, in input order.
    pub reports: Vec<SourceReport>,
}

impl MergeOutcome {
    pub fn failed_sources(&self) -> impl Iterator<Item = &SourceReport> {
        self.reports.iter().filter(|report| !report.is_ok())
    }
}

/// Merges `sources` into a fresh canonical dataset.
///
/// A source that cannot be read is reported and skipped; rows of the other
/// sources are kept. Each source commits in its own transaction. Only a
/// failure of the canonical store itself fails the whole merge.
///
/// This is a sync function meant to run on a worker thread.
pub fn merge_sources(sources: &[SourceFile], options: &IngestOptions) -> Result<MergeOutcome> {
    let start = Instant::now();
    let mut store = CanonicalStore::open_in_memory(&options.canonical_table)?;
    let mut seen_ids = HashSet::new();
    let mut reports = Vec::with_capacity(sources.len());

    for source in sources {
        let span = info_span!("merge_source", source_id = %source.id);
        let _guard = span.enter();

        let mut report = SourceReport::new(source);
        match ingest_source(source, options, &mut store, &mut seen_ids, &mut report) {
            Ok(()) => {
                info!(
                    imported = report.imported,
                    skipped = report.skipped,
                    "source merged"
                );
            }
            Err(error) => {
                warn!(%error, "source skipped");
                report.imported = 0;
                report.error = Some(error.to_string());
            }
        }
        reports.push(report);
    }

    let dataset = DatasetHandle::new(store.to_dataset()?);
    let imported = reports.iter().map(|report| report.imported).sum();
    info!(
        imported,
        sources = sources.len(),
        duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        "merge complete"
    );

    Ok(MergeOutcome {
        imported,
        dataset,
        reports,
    })
}

fn ingest_source(
    source: &SourceFile,
    options: &IngestOptions,
    store: &mut CanonicalStore,
    seen_ids: &mut HashSet<String>,
    report: &mut SourceReport,
) -> Result<()> {
    if source.size() > options.max_source_bytes {
        return Err(IngestError::SourceTooLarge {
            source_id: source.id.clone(),
            size: source.size(),
            max_size: options.max_source_bytes,
        });
    }

    let database = SourceDatabase::open(source)?;
    let tables = database.tables()?;
    let table = select_table(&tables).map_err(|source_err| IngestError::NoTable {
        source_id: source.id.clone(),
        source: source_err,
    })?;
    report.table = Some(table.name.clone());

    let field_map = map_columns(&table.columns, &options.aliases);
    if field_map.lacks_identity() {
        debug!(table = %table.name, "no text or reference column mapped");
    }
    let layout = RowLayout::new(&table.columns, &field_map);

    let mut batch_ids = HashSet::new();
    let mut questions = Vec::new();
    for row in database.rows(&table.name)? {
        let mut draft = normalize_row(&row, &layout, options.placeholder_choices);
        if draft.is_blank() {
            report.skipped += 1;
            continue;
        }

        draft.id = assign_id(&source.id, raw_row_id(&row, &layout).as_deref(), |id| {
            seen_ids.contains(id) || batch_ids.contains(id)
        });
        draft.source_file = source.display_name.clone();
        trace!(id = %draft.id, text = %redact_text(&draft.text), "normalized row");

        batch_ids.insert(draft.id.clone());
        questions.push(draft.build());
    }

    report.imported = commit(store, &questions)?;
    seen_ids.extend(batch_ids);
    Ok(())
}

fn commit(store: &mut CanonicalStore, questions: &[Question]) -> Result<usize> {
    if questions.is_empty() {
        return Ok(0);
    }
    store.insert_batch(questions)
}

/// Builds a composite id, falling back to a random token when the row has
/// no id or its id is already taken.
fn assign_id(source_id: &str, raw: Option<&str>, taken: impl Fn(&str) -> bool) -> String {
    if let Some(raw) = raw {
        let id = format!("{source_id}_{raw}");
        if !taken(&id) {
            return id;
        }
        debug!(%id, "duplicate row id, using a random token");
    }
    format!("{source_id}_{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_id_uses_raw_id() {
        assert_eq!(assign_id("bank", Some("12"), |_| false), "bank_12");
    }

    #[test]
    fn missing_or_taken_id_gets_random_token() {
        let missing = assign_id("bank", None, |_| false);
        assert!(missing.starts_with("bank_"));
        assert_eq!(missing.len(), "bank_".len() + 32);

        let taken = assign_id("bank", Some("1"), |id| id == "bank_1");
        assert_ne!(taken, "bank_1");
        assert!(taken.starts_with("bank_"));
    }

    #[test]
    fn unreadable_source_is_reported() {
        let sources = vec![SourceFile::new("junk", "junk.db", b"plain text".to_vec())];
        let outcome = merge_sources(&sources, &IngestOptions::default()).expect("merge");
        assert_eq!(outcome.imported, 0);
        assert!(outcome.dataset.is_empty());
        assert_eq!(outcome.failed_sources().count(), 1);
        assert!(outcome.reports[0].error.is_some());
    }

    #[test]
    fn oversized_source_is_reported() {
        let options = IngestOptions::default().with_max_source_bytes(4);
        let sources = vec![SourceFile::new("big", "big.db", vec![0; 16])];
        let outcome = merge_sources(&sources, &options).expect("merge");
        let error = outcome.reports[0].error.as_deref().unwrap_or_default();
        assert!(error.contains("too large"), "{error}");
    }
}
