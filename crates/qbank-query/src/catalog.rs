//! Book, chapter and domain summaries of a dataset.

use std::collections::HashMap;

use qbank_common::natural_cmp;
use qbank_model::{Dataset, UNCATEGORIZED};
use serde::Serialize;

use crate::reference::RefParts;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterEntry {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookEntry {
    pub name: String,
    pub count: usize,
    /// Chapters in natural order.
    pub chapters: Vec<ChapterEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainCount {
    /// Label as first seen; labels differing only in case are merged.
    pub name: String,
    pub count: usize,
}

/// Everything a host needs to offer book/chapter scopes and a domain
/// allow-list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    /// Books in natural order.
    pub books: Vec<BookEntry>,
    /// Domains in natural order, `Uncategorized` included when used.
    pub domains: Vec<DomainCount>,
}

impl Catalog {
    pub fn build(dataset: &Dataset) -> Self {
        let mut books: HashMap<String, HashMap<String, usize>> = HashMap::new();
        let mut domains: HashMap<String, DomainCount> = HashMap::new();

        for question in dataset.questions() {
            let parts = RefParts::of(question);
            *books
                .entry(parts.book)
                .or_default()
                .entry(parts.chapter)
                .or_default() += 1;

            let labels: Vec<&str> = if question.domain.is_empty() {
                vec![UNCATEGORIZED]
            } else {
                question.domain.iter().collect()
            };
            for label in labels {
                domains
                    .entry(label.to_lowercase())
                    .or_insert_with(|| DomainCount {
                        name: label.to_string(),
                        count: 0,
                    })
                    .count += 1;
            }
        }

        let mut books: Vec<BookEntry> = books
            .into_iter()
            .map(|(name, chapters)| {
                let mut chapters: Vec<ChapterEntry> = chapters
                    .into_iter()
                    .map(|(name, count)| ChapterEntry { name, count })
                    .collect();
                chapters.sort_by(|a, b| natural_cmp(&a.name, &b.name));
                BookEntry {
                    count: chapters.iter().map(|c| c.count).sum(),
                    name,
                    chapters,
                }
            })
            .collect();
        books.sort_by(|a, b| natural_cmp(&a.name, &b.name));

        let mut domains: Vec<DomainCount> = domains.into_values().collect();
        domains.sort_by(|a, b| natural_cmp(&a.name, &b.name));

        Self { books, domains }
    }

    pub fn book(&self, name: &str) -> Option<&BookEntry> {
        self.books.iter().find(|book| book.name == name)
    }

    pub fn total(&self) -> usize {
        self.books.iter().map(|book| book.count).sum()
    }
}
