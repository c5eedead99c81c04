//! Running merges off the caller's thread.
//!
//! A merge reports back exactly once, through [`MergeMessage`]. Thread-based
//! hosts use [`spawn_merge`] with a channel; async hosts await
//! [`merge_async`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

use qbank_model::DatasetHandle;
use tracing::{error, info};

use crate::engine::{MergeOutcome, SourceReport, merge_sources};
use crate::error::{IngestError, Result};
use crate::options::IngestOptions;
use crate::source::SourceFile;

/// Terminal message of a background merge.
#[derive(Debug, Clone)]
pub enum MergeMessage {
    Success {
        imported: usize,
        dataset: DatasetHandle,
        reports: Vec<SourceReport>,
    },
    Error {
        message: String,
    },
}

impl MergeMessage {
    fn from_result(result: Result<MergeOutcome>) -> Self {
        match result {
            Ok(outcome) => Self::Success {
                imported: outcome.imported,
                dataset: outcome.dataset,
                reports: outcome.reports,
            },
            Err(err) => {
                error!(error = %err, "merge failed");
                Self::Error {
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Handle to a merge running on its own thread.
pub struct MergeHandle {
    thread: JoinHandle<()>,
}

impl MergeHandle {
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Blocks until the worker thread exits.
    pub fn join(self) {
        if self.thread.join().is_err() {
            error!("merge thread panicked");
        }
    }
}

/// Starts a merge on a background thread.
///
/// The single [`MergeMessage`] is delivered through `sender`, also when the
/// merge panics; a dropped receiver is ignored.
pub fn spawn_merge(
    sources: Vec<SourceFile>,
    options: IngestOptions,
    sender: Sender<MergeMessage>,
) -> MergeHandle {
    let thread = std::thread::spawn(move || {
        let result = panic::catch_unwind(AssertUnwindSafe(|| merge_sources(&sources, &options)));
        let message = match result {
            Ok(result) => MergeMessage::from_result(result),
            Err(payload) => {
                let reason = panic_message(&*payload);
                let message = format!("Merge thread panicked: {reason}");
                error!(%message, "merge failed");
                MergeMessage::Error { message }
            }
        };
        let _ = sender.send(message);
    });
    MergeHandle { thread }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

/// Runs a merge on the blocking pool and awaits its terminal message.
pub async fn merge_async(sources: Vec<SourceFile>, options: IngestOptions) -> MergeMessage {
    match tokio::task::spawn_blocking(move || merge_sources(&sources, &options)).await {
        Ok(result) => MergeMessage::from_result(result),
        Err(e) => MergeMessage::Error {
            message: format!("Merge task panicked: {e}"),
        },
    }
}

/// Holder of the current canonical dataset.
///
/// Each successful merge replaces the previous dataset; a failed merge
/// leaves it untouched.
#[derive(Debug, Default)]
pub struct QuestionBank {
    current: Option<DatasetHandle>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a merge result, returning the imported count.
    pub fn apply(&mut self, message: MergeMessage) -> Result<usize> {
        match message {
            MergeMessage::Success {
                imported, dataset, ..
            } => {
                info!(imported, questions = dataset.len(), "dataset replaced");
                self.current = Some(dataset);
                Ok(imported)
            }
            MergeMessage::Error { message } => Err(IngestError::MergeFailed { message }),
        }
    }

    /// The current dataset, if a merge has ever succeeded.
    pub fn dataset(&self) -> Option<&DatasetHandle> {
        self.current.as_ref()
    }
}
