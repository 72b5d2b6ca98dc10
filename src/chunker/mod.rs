mod lines;
mod policy;
mod sentence;
mod splitter;


pub use lines::split_by_lines;
pub use policy::ChunkPolicy;
pub use sentence::{split_by_sentence, split_sentences};
pub use splitter::{split_fixed_width, split_hybrid};

/// Characters per page for the width-based policies
pub const DEFAULT_CHUNK_SIZE: usize = 220;

/// Page cap applied by the hybrid policy
pub const DEFAULT_MAX_PAGES: usize = 10;

/// Lines per page for the line-bounded policy
pub const DEFAULT_MAX_LINES: usize = 12;

/// Characters per page for the line-bounded policy
pub const DEFAULT_MAX_CHARS: usize = 220;

/// Byte offset of the `n`-th char of `text`, or `None` if `text` has `n` chars or fewer.
pub(crate) fn char_boundary(text: &str, n: usize) -> Option<usize> {
    text.char_indices().nth(n).map(|(offset, _)| offset)
}
