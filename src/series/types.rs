use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a series, generated once and never reused
pub type SeriesId = Uuid;

/// An ordered, titled run of pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    /// Fresh v4 identifier
    pub id: SeriesId,
    /// Ordinal title, e.g. "첫번째 시리즈"
    pub title: String,
    /// Page texts in reading order, never empty
    pub pages: Vec<String>,
}

impl Series {
    /// Create a series with a freshly generated id.
    ///
    /// Callers pass at least one page; the grouper never builds empty batches.
    pub(crate) fn new(title: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            pages,
        }
    }

    /// Number of pages in this series
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page text by 1-based page number
    pub fn page(&self, page_number: usize) -> Option<&str> {
        page_number
            .checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .map(String::as_str)
    }
}
