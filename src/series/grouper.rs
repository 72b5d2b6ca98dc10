use tracing::debug;

use super::{OrdinalLocale, Series};
use crate::chunker::ChunkPolicy;
use crate::normalizer::{normalize, normalize_lines};

/// Partition pages into consecutive series of `pages_per_series`.
///
/// The final series holds the remainder and may be shorter. Window `i`
/// (1-based) is titled by its ordinal in `locale` and every series gets a
/// fresh id. No pages means no series.
pub fn group_into_series(
    pages: Vec<String>,
    pages_per_series: usize,
    locale: OrdinalLocale,
) -> Vec<Series> {
    let window = pages_per_series.max(1);
    let mut series = Vec::with_capacity(pages.len().div_ceil(window));
    let mut pages = pages.into_iter().peekable();

    while pages.peek().is_some() {
        let batch: Vec<String> = pages.by_ref().take(window).collect();
        let position = series.len() + 1;
        series.push(Series::new(locale.series_title(position), batch));
    }

    series
}

/// Normalize, chunk and group text in one pass using an explicit policy.
///
/// The line-bounded policy keeps single line breaks; every other policy
/// folds them into spaces. Text that is blank after normalizing gives no
/// series.
pub fn build_series_with(
    text: &str,
    policy: &ChunkPolicy,
    pages_per_series: usize,
    locale: OrdinalLocale,
) -> Vec<Series> {
    let normalized = match policy {
        ChunkPolicy::LineBounded { .. } => normalize_lines(text),
        _ => normalize(text),
    };
    if normalized.trim().is_empty() {
        debug!(policy = policy.name(), "nothing to paginate");
        return Vec::new();
    }

    let pages = policy.chunk(&normalized);
    debug!(
        policy = policy.name(),
        chars = normalized.chars().count(),
        pages = pages.len(),
        "chunked text"
    );

    group_into_series(pages, pages_per_series, locale)
}

/// Normalize, chunk and group text, choosing the policy from the limits.
///
/// See [`ChunkPolicy::from_limits`] for how the limits map to a policy.
/// Titles use the default locale.
pub fn build_series(
    text: &str,
    chunk_size: usize,
    max_lines: Option<usize>,
    pages_per_series: usize,
    max_pages: Option<usize>,
) -> Vec<Series> {
    let policy = ChunkPolicy::from_limits(chunk_size, max_lines, max_pages);
    build_series_with(text, &policy, pages_per_series, OrdinalLocale::default())
}
