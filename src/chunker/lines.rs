/// Group lines into pages bounded by line count and char count.
///
/// Before a line is added, the current page is closed if taking the line
/// would push it past `max_lines` lines or `max_chars` chars (newline
/// separators are not counted). The line that caused the overflow opens
/// the next page. A single line longer than `max_chars` is kept whole.
pub fn split_by_lines(text: &str, max_lines: usize, max_chars: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![];
    }

    let mut pages = Vec::new();
    let mut current_lines: Vec<&str> = Vec::new();
    let mut current_chars = 0;

    for line in text.split('\n') {
        let line_chars = line.chars().count();
        let overflows =
            current_lines.len() + 1 > max_lines || current_chars + line_chars > max_chars;

        if overflows && !current_lines.is_empty() {
            pages.push(current_lines.join("\n"));
            current_lines.clear();
            current_chars = 0;
        }

        current_lines.push(line);
        current_chars += line_chars;
    }

    // Always flush the tail, even when it is short
    if !current_lines.is_empty() {
        pages.push(current_lines.join("\n"));
    }

    pages
}
