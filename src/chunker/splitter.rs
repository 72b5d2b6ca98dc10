use tracing::debug;

use super::char_boundary;
use super::sentence::split_by_sentence;

/// Cut text into pages of exactly `chunk_size` chars, left to right.
///
/// The last page holds whatever remains and may be shorter. Word and
/// sentence boundaries are ignored, so a page can end mid-word.
/// Concatenating the pages gives back the input unchanged.
///
/// A `chunk_size` of zero is treated as one.
pub fn split_fixed_width(text: &str, chunk_size: usize) -> Vec<String> {
    let width = chunk_size.max(1);
    let mut pages = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let cut = char_boundary(rest, width).unwrap_or(rest.len());
        let (head, tail) = rest.split_at(cut);
        pages.push(head.to_string());
        rest = tail;
    }

    pages
}

/// Fixed-width head, sentence-aware tail, capped at `max_pages`.
///
/// Runs up to `max_pages - 1` fixed-width cuts. The loop stops as soon as
/// no more than `chunk_size` chars are left; whatever is left is packed by
/// sentence. Pages beyond `max_pages` are dropped.
pub fn split_hybrid(text: &str, chunk_size: usize, max_pages: usize) -> Vec<String> {
    let width = chunk_size.max(1);
    let mut pages = Vec::new();
    let mut rest = text;

    for _ in 0..max_pages.saturating_sub(1) {
        let Some(cut) = char_boundary(rest, width) else {
            break;
        };
        let (head, tail) = rest.split_at(cut);
        pages.push(head.to_string());
        rest = tail;
    }

    let fixed = pages.len();
    if !rest.is_empty() {
        pages.extend(split_by_sentence(rest, width));
    }

    if pages.len() > max_pages {
        debug!(
            produced = pages.len(),
            kept = max_pages,
            "hybrid pagination dropped pages past the cap"
        );
        pages.truncate(max_pages);
    }

    debug!(fixed, total = pages.len(), "hybrid pagination complete");
    pages
}
