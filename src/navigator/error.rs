use thiserror::Error;

use crate::series::SeriesId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Series does not exist: {0}")]
    NotFound(SeriesId),

    #[error("Invalid page number: {page} (series has {total} pages)")]
    OutOfRange { page: usize, total: usize },
}
