use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    DEFAULT_CHUNK_SIZE, DEFAULT_MAX_PAGES, split_by_lines, split_by_sentence, split_fixed_width,
    split_hybrid,
};

/// Rule used to cut normalized text into pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChunkPolicy {
    /// Exactly `chunk_size` chars per page, remainder last
    FixedWidth { chunk_size: usize },
    /// Whole sentences packed up to `chunk_size` chars
    Sentence { chunk_size: usize },
    /// Fixed-width pages first, sentence packing for the tail, at most `max_pages` pages
    Hybrid { chunk_size: usize, max_pages: usize },
    /// Lines packed up to `max_lines` lines and `max_chars` chars
    LineBounded { max_lines: usize, max_chars: usize },
}

impl ChunkPolicy {
    /// Pick a policy from the limits a caller supplies.
    ///
    /// A line limit selects the line-bounded policy (with `chunk_size` as its
    /// char bound), a page cap selects hybrid, and otherwise pages are packed
    /// by sentence.
    pub fn from_limits(
        chunk_size: usize,
        max_lines: Option<usize>,
        max_pages: Option<usize>,
    ) -> Self {
        match (max_lines, max_pages) {
            (Some(max_lines), _) => ChunkPolicy::LineBounded {
                max_lines,
                max_chars: chunk_size,
            },
            (None, Some(max_pages)) => ChunkPolicy::Hybrid {
                chunk_size,
                max_pages,
            },
            (None, None) => ChunkPolicy::Sentence { chunk_size },
        }
    }

    /// Split text according to this policy
    pub fn chunk(&self, text: &str) -> Vec<String> {
        match *self {
            ChunkPolicy::FixedWidth { chunk_size } => split_fixed_width(text, chunk_size),
            ChunkPolicy::Sentence { chunk_size } => split_by_sentence(text, chunk_size),
            ChunkPolicy::Hybrid {
                chunk_size,
                max_pages,
            } => split_hybrid(text, chunk_size, max_pages),
            ChunkPolicy::LineBounded {
                max_lines,
                max_chars,
            } => split_by_lines(text, max_lines, max_chars),
        }
    }

    /// Short name used on the command line and in logs
    pub fn name(&self) -> &'static str {
        match self {
            ChunkPolicy::FixedWidth { .. } => "fixed",
            ChunkPolicy::Sentence { .. } => "sentence",
            ChunkPolicy::Hybrid { .. } => "hybrid",
            ChunkPolicy::LineBounded { .. } => "lines",
        }
    }

    /// Name of the first limit that is zero, if any
    pub fn zero_limit(&self) -> Option<&'static str> {
        match *self {
            ChunkPolicy::FixedWidth { chunk_size } | ChunkPolicy::Sentence { chunk_size }
                if chunk_size == 0 =>
            {
                Some("chunk_size")
            }
            ChunkPolicy::Hybrid { chunk_size: 0, .. } => Some("chunk_size"),
            ChunkPolicy::Hybrid { max_pages: 0, .. } => Some("max_pages"),
            ChunkPolicy::LineBounded { max_lines: 0, .. } => Some("max_lines"),
            ChunkPolicy::LineBounded { max_chars: 0, .. } => Some("max_chars"),
            _ => None,
        }
    }
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        ChunkPolicy::Hybrid {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl fmt::Display for ChunkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ChunkPolicy::FixedWidth { chunk_size } | ChunkPolicy::Sentence { chunk_size } => {
                write!(f, "{} ({} chars)", self.name(), chunk_size)
            }
            ChunkPolicy::Hybrid {
                chunk_size,
                max_pages,
            } => write!(
                f,
                "{} ({} chars, max {} pages)",
                self.name(),
                chunk_size,
                max_pages
            ),
            ChunkPolicy::LineBounded {
                max_lines,
                max_chars,
            } => write!(
                f,
                "{} ({} lines, {} chars)",
                self.name(),
                max_lines,
                max_chars
            ),
        }
    }
}
