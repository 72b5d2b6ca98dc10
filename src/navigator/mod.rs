mod error;


pub use error::NavigationError;

use serde::Serialize;

use crate::registry::Library;
use crate::series::SeriesId;

/// One resolved page plus what a reader needs to move on from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub series_id: SeriesId,
    pub series_title: String,
    pub content: String,
    /// 1-based
    pub page_number: usize,
    pub total_pages: usize,
    /// Only set on the last page of a series
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_series_id: Option<SeriesId>,
    /// Only set on the last page of a series
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_series_id: Option<SeriesId>,
}

impl PageView {
    pub fn is_last_page(&self) -> bool {
        self.page_number == self.total_pages
    }

    pub fn has_prev_page(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// Page number to go back to, if any
    pub fn prev_page(&self) -> Option<usize> {
        self.has_prev_page().then(|| self.page_number - 1)
    }

    /// Page number to go forward to, if any
    pub fn next_page(&self) -> Option<usize> {
        self.has_next_page().then(|| self.page_number + 1)
    }
}

/// Resolve a 1-based page of a series against a library snapshot.
///
/// Adjacent series are looked up by insertion order, and only when the
/// requested page is the last one of its series.
pub fn resolve_page(
    library: &Library,
    series_id: SeriesId,
    page_number: usize,
) -> Result<PageView, NavigationError> {
    let series = library
        .get(&series_id)
        .ok_or(NavigationError::NotFound(series_id))?;

    let total_pages = series.page_count();
    let content = series
        .page(page_number)
        .ok_or(NavigationError::OutOfRange {
            page: page_number,
            total: total_pages,
        })?;

    let (prev_series_id, next_series_id) = if page_number == total_pages {
        library.neighbours(&series_id).unwrap_or((None, None))
    } else {
        (None, None)
    };

    Ok(PageView {
        series_id,
        series_title: series.title.clone(),
        content: content.to_string(),
        page_number,
        total_pages,
        prev_series_id,
        next_series_id,
    })
}
