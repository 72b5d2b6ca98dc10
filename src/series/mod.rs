mod grouper;
mod ordinal;
mod types;


pub use grouper::{build_series, build_series_with, group_into_series};
pub use ordinal::{OrdinalLocale, ordinal_label};
pub use types::{Series, SeriesId};

/// Pages per series unless configured otherwise
pub const DEFAULT_PAGES_PER_SERIES: usize = 10;
