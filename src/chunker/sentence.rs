use std::mem;

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '?' | '!')
}

/// Split text after every `.`, `?` or `!`.
///
/// The terminator stays on the sentence it closes. The text before it is
/// trimmed, and pieces that end up empty are dropped. A run such as `...`
/// therefore yields one sentence per dot after the first.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for (offset, c) in text.char_indices() {
        if !is_terminator(c) {
            continue;
        }

        let body = text[start..offset].trim();
        sentences.push(format!("{body}{c}"));
        start = offset + c.len_utf8();
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

/// Pack whole sentences into pages of at most `chunk_size` chars.
///
/// Sentences are joined by a single space. A sentence is added to the
/// current page while `current + sentence + 1 <= chunk_size`; otherwise the
/// page is closed and the sentence opens the next one. A sentence longer
/// than `chunk_size` is never cut and becomes an oversized page.
pub fn split_by_sentence(text: &str, chunk_size: usize) -> Vec<String> {
    let mut pages = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for sentence in split_sentences(text) {
        let len = sentence.chars().count();

        if current_len + len + 1 <= chunk_size {
            if !current.is_empty() {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(&sentence);
            current_len += len;
        } else {
            if !current.is_empty() {
                pages.push(mem::take(&mut current));
            }
            current = sentence;
            current_len = len;
        }
    }

    if !current.is_empty() {
        pages.push(current);
    }

    pages
}
