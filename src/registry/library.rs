use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use crate::extract::DocumentFormat;
use crate::series::{Series, SeriesId};

/// Record of one ingested document
#[derive(Debug, Clone, Serialize)]
pub struct DocumentInfo {
    /// Where the text came from (file path or caller-supplied label)
    pub source: String,
    /// Format the text was extracted from
    pub format: DocumentFormat,
    /// SHA-256 of the extracted text, hex encoded
    pub fingerprint: String,
    /// Length of the extracted text in chars
    pub char_count: usize,
    /// Series built from this document, in order
    pub series_ids: Vec<SeriesId>,
    pub ingested_at: DateTime<Utc>,
}

/// Immutable, insertion-ordered view of the registry.
///
/// Order is load-bearing: the series before and after an entry are its
/// navigation neighbours.
#[derive(Debug, Clone, Default)]
pub struct Library {
    entries: Vec<Arc<Series>>,
    index: HashMap<SeriesId, usize>,
    documents: Vec<DocumentInfo>,
}

impl Library {
    /// Build a library holding exactly `series`, in order
    pub fn from_series(series: Vec<Series>, document: Option<DocumentInfo>) -> Self {
        Self::default().with_appended(series, document)
    }

    /// Copy of this library with `series` added at the end.
    ///
    /// Series without pages and ids already present are skipped.
    pub fn with_appended(&self, series: Vec<Series>, document: Option<DocumentInfo>) -> Self {
        let mut next = self.clone();

        for entry in series {
            if entry.pages.is_empty() {
                warn!(series = %entry.id, title = %entry.title, "skipping series without pages");
                continue;
            }
            if next.index.contains_key(&entry.id) {
                continue;
            }
            next.index.insert(entry.id, next.entries.len());
            next.entries.push(Arc::new(entry));
        }

        next.documents.extend(document);
        next
    }

    /// Number of series
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a series by id
    pub fn get(&self, id: &SeriesId) -> Option<&Series> {
        self.index
            .get(id)
            .and_then(|&position| self.entries.get(position))
            .map(|series| series.as_ref())
    }

    /// 0-based insertion position of a series
    pub fn position(&self, id: &SeriesId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Series at a 0-based insertion position
    pub fn at(&self, position: usize) -> Option<&Series> {
        self.entries.get(position).map(|series| series.as_ref())
    }

    /// Earliest inserted series
    pub fn first(&self) -> Option<&Series> {
        self.at(0)
    }

    /// Ids of the entries immediately before and after `id`
    pub fn neighbours(&self, id: &SeriesId) -> Option<(Option<SeriesId>, Option<SeriesId>)> {
        let position = self.position(id)?;
        let prev = position
            .checked_sub(1)
            .and_then(|p| self.entries.get(p))
            .map(|series| series.id);
        let next = self.entries.get(position + 1).map(|series| series.id);
        Some((prev, next))
    }

    /// All series in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.entries.iter().map(|series| series.as_ref())
    }

    /// Documents ingested into this library, oldest first
    pub fn documents(&self) -> &[DocumentInfo] {
        &self.documents
    }

    /// Total pages across every series
    pub fn page_count(&self) -> usize {
        self.entries.iter().map(|series| series.page_count()).sum()
    }
}
