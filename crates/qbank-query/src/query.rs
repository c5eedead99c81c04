//! Filtering and sampling of the canonical dataset.

use std::collections::HashSet;

use qbank_model::{DatasetHandle, Question, UNCATEGORIZED};
use rand::seq::SliceRandom;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{QueryError, Result};
use crate::reference::{RefParts, compare_reading_order};

/// Filter on the caller's review flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewFilter {
    #[default]
    All,
    ExcludeReviewed,
    OnlyReviewed,
}

/// Filter on question type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindFilter {
    #[default]
    All,
    Matching,
    MultiSelect,
    ImageFlagged,
}

impl KindFilter {
    fn accepts(self, question: &Question) -> bool {
        match self {
            Self::All => true,
            Self::Matching => question.is_matching(),
            Self::MultiSelect => question.is_multi_choice(),
            Self::ImageFlagged => question.is_image_flagged(),
        }
    }
}

/// A book, or one chapter of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub book: String,
    #[serde(default)]
    pub chapter: Option<String>,
}

impl Scope {
    pub fn book(book: impl Into<String>) -> Self {
        Self {
            book: book.into(),
            chapter: None,
        }
    }

    pub fn chapter(book: impl Into<String>, chapter: impl Into<String>) -> Self {
        Self {
            book: book.into(),
            chapter: Some(chapter.into()),
        }
    }

    fn contains(&self, parts: &RefParts) -> bool {
        self.book == parts.book
            && self
                .chapter
                .as_ref()
                .is_none_or(|chapter| *chapter == parts.chapter)
    }
}

/// Query parameters.
///
/// Empty lists and `None` mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    /// Maximum number of questions returned.
    pub limit: Option<usize>,
    /// Domain allow-list; questions without domains count as
    /// `Uncategorized`.
    pub domains: Vec<String>,
    pub review: ReviewFilter,
    /// Case-insensitive substring of the text, explanation or a choice.
    pub search: Option<String>,
    pub kind: KindFilter,
    pub exclude_images: bool,
    /// Book/chapter allow-list, by parsed reference id.
    pub scopes: Vec<Scope>,
    /// Return questions in reading order instead of shuffled.
    pub sequential: bool,
    /// Seed for reproducible shuffles.
    pub seed: Option<u64>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains = domains.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_review(mut self, review: ReviewFilter) -> Self {
        self.review = review;
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: KindFilter) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_exclude_images(mut self, exclude: bool) -> Self {
        self.exclude_images = exclude;
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scopes.push(scope);
        self
    }

    #[must_use]
    pub fn with_sequential(mut self, sequential: bool) -> Self {
        self.sequential = sequential;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Runs a query against the current dataset.
///
/// `reviewed` holds the ids the caller has flagged for review. Returns
/// [`QueryError::DatasetNotBuilt`] only when no dataset exists yet; a query
/// matching nothing yields an empty list.
pub fn run_query(
    dataset: Option<&DatasetHandle>,
    options: &QueryOptions,
    reviewed: &HashSet<String>,
) -> Result<Vec<Question>> {
    let dataset = dataset.ok_or(QueryError::DatasetNotBuilt)?;
    let filter = Filter::new(options, reviewed);

    let mut matches: Vec<(RefParts, &Question)> = dataset
        .questions()
        .iter()
        .filter(|question| filter.accepts(question))
        .map(|question| (RefParts::of(question), question))
        .filter(|(parts, _)| filter.in_scope(parts))
        .collect();

    if options.sequential {
        matches.sort_by(|(a, _), (b, _)| compare_reading_order(a, b));
    } else {
        match options.seed {
            Some(seed) => matches.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => matches.shuffle(&mut rand::thread_rng()),
        }
    }

    if let Some(limit) = options.limit {
        matches.truncate(limit);
    }
    debug!(
        total = dataset.len(),
        returned = matches.len(),
        sequential = options.sequential,
        "query complete"
    );

    Ok(matches
        .into_iter()
        .map(|(_, question)| question.clone())
        .collect())
}

/// Pre-normalized predicates of one query.
struct Filter<'a> {
    options: &'a QueryOptions,
    reviewed: &'a HashSet<String>,
    domains: Vec<String>,
    search: Option<String>,
}

impl<'a> Filter<'a> {
    fn new(options: &'a QueryOptions, reviewed: &'a HashSet<String>) -> Self {
        let domains = options
            .domains
            .iter()
            .map(|domain| domain.trim().to_lowercase())
            .filter(|domain| !domain.is_empty())
            .collect();
        let search = options
            .search
            .as_deref()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty());
        Self {
            options,
            reviewed,
            domains,
            search,
        }
    }

    fn accepts(&self, question: &Question) -> bool {
        self.review_ok(question)
            && self.domain_ok(question)
            && self.options.kind.accepts(question)
            && !(self.options.exclude_images && question.is_image_flagged())
            && self.search_ok(question)
    }

    fn review_ok(&self, question: &Question) -> bool {
        let flagged = self.reviewed.contains(&question.id);
        match self.options.review {
            ReviewFilter::All => true,
            ReviewFilter::ExcludeReviewed => !flagged,
            ReviewFilter::OnlyReviewed => flagged,
        }
    }

    fn domain_ok(&self, question: &Question) -> bool {
        if self.domains.is_empty() {
            return true;
        }
        if question.domain.is_empty() {
            return self.domains.iter().any(|d| d == &UNCATEGORIZED.to_lowercase());
        }
        question
            .domain
            .iter()
            .any(|label| self.domains.contains(&label.to_lowercase()))
    }

    fn search_ok(&self, question: &Question) -> bool {
        let Some(term) = &self.search else {
            return true;
        };
        let hit = |value: &str| value.to_lowercase().contains(term.as_str());
        hit(&question.text)
            || hit(&question.explanation)
            || question.choices.iter().any(|(_, text)| hit(text))
    }

    fn in_scope(&self, parts: &RefParts) -> bool {
        self.options.scopes.is_empty() || self.options.scopes.iter().any(|s| s.contains(parts))
    }
}
