use once_cell::sync::Lazy;
use regex::Regex;

/// Stand-in for a paragraph break while single newlines are folded.
/// Uses a private-use codepoint so it cannot collide with extracted text.
const PARAGRAPH_MARKER: &str = "\u{E000}";

static RE_CARRIAGE_RETURN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n?").unwrap());
static RE_PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

/// Clean up extraction artifacts before chunking:
/// - `\r\n` and lone `\r` become `\n`
/// - every run of two or more newlines becomes exactly `\n\n`
/// - every remaining single newline becomes a space
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let unified = RE_CARRIAGE_RETURN.replace_all(raw, "\n");

    // Protect paragraph breaks first, otherwise the single-newline pass eats them
    let protected = RE_PARAGRAPH_BREAK.replace_all(&unified, PARAGRAPH_MARKER);
    let folded = protected.replace('\n', " ");

    folded.replace(PARAGRAPH_MARKER, "\n\n")
}

/// Clean up text for line-bounded pagination, where line breaks are content.
///
/// Line endings are unified as in [`normalize`], but single newlines are
/// kept and blank or whitespace-only lines are dropped, so paragraph gaps
/// never count against a page's line budget.
pub fn normalize_lines(raw: &str) -> String {
    let unified = RE_CARRIAGE_RETURN.replace_all(raw, "\n");

    unified
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_single_newlines_become_spaces() {
        assert_eq!(normalize("one\ntwo\nthree"), "one two three");
    }

    #[test]
    fn test_newline_runs_collapse_to_paragraph_break() {
        assert_eq!(normalize("one\n\ntwo"), "one\n\ntwo");
        assert_eq!(normalize("one\n\n\n\n\ntwo"), "one\n\ntwo");
    }

    #[test]
    fn test_mixed_breaks() {
        let raw = "line a\nline b\n\n\nnext para\nwrapped";
        assert_eq!(normalize(raw), "line a line b\n\nnext para wrapped");
    }

    #[test]
    fn test_windows_line_endings() {
        assert_eq!(normalize("a\r\nb\r\n\r\nc"), "a b\n\nc");
        assert_eq!(normalize("a\rb"), "a b");
    }

    #[test]
    fn test_text_without_newlines_is_untouched() {
        let raw = "첫 문장입니다. Second sentence!";
        assert_eq!(normalize(raw), raw);
    }

    #[test]
    fn test_normalize_lines_keeps_single_breaks() {
        assert_eq!(normalize_lines("one\ntwo\r\nthree"), "one\ntwo\nthree");
    }

    #[test]
    fn test_normalize_lines_drops_blank_lines() {
        assert_eq!(normalize_lines("a\n\nb\n \n\n\nc\n"), "a\nb\nc");
        assert_eq!(normalize_lines("\n\n\n"), "");
        assert_eq!(normalize_lines(""), "");
    }

    #[test]
    fn test_leading_and_trailing_newlines() {
        assert_eq!(normalize("\nabc\n"), " abc ");
        assert_eq!(normalize("\n\nabc\n\n\n"), "\n\nabc\n\n");
    }
}
