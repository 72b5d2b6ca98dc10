use quick_xml::events::{BytesText, Event};
use quick_xml::Reader;
use tracing::debug;

/// Elements whose start and end break the line
const BLOCK_ELEMENTS: &[&[u8]] = &[
    b"p",
    b"div",
    b"h1",
    b"h2",
    b"h3",
    b"h4",
    b"h5",
    b"h6",
    b"li",
    b"tr",
    b"br",
    b"blockquote",
    b"pre",
    b"section",
    b"article",
    b"dt",
    b"dd",
];

/// Elements whose content is never reading text
const SKIPPED_ELEMENTS: &[&[u8]] = &[b"head", b"script", b"style"];

fn is_block(name: &[u8]) -> bool {
    BLOCK_ELEMENTS.contains(&name)
}

fn is_skipped(name: &[u8]) -> bool {
    SKIPPED_ELEMENTS.contains(&name)
}

/// Named entities XHTML content commonly uses without a DTD
fn resolve_html_entity(entity: &str) -> Option<&'static str> {
    match entity {
        "nbsp" => Some("\u{00A0}"),
        "mdash" => Some("\u{2014}"),
        "ndash" => Some("\u{2013}"),
        "hellip" => Some("\u{2026}"),
        "lsquo" => Some("\u{2018}"),
        "rsquo" => Some("\u{2019}"),
        "ldquo" => Some("\u{201C}"),
        "rdquo" => Some("\u{201D}"),
        "copy" => Some("\u{00A9}"),
        _ => None,
    }
}

/// Decode a text node, keeping the raw bytes when an entity is unknown
pub(crate) fn text_of(text: &BytesText<'_>) -> String {
    match text.unescape_with(resolve_html_entity) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(text).into_owned(),
    }
}

/// Strip markup from an XHTML document, keeping one line per block.
///
/// Whitespace inside each line is collapsed and blank lines are dropped.
/// Parsing is lenient: mismatched end tags are tolerated, and a hard parse
/// error ends the document with whatever text was collected so far.
pub fn xhtml_to_text(xhtml: &str) -> String {
    let mut reader = Reader::from_str(xhtml);
    reader.check_end_names(false);

    let mut raw = String::new();
    let mut skip_depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name();
                if is_skipped(name.as_ref()) {
                    skip_depth += 1;
                } else if is_block(name.as_ref()) {
                    raw.push('\n');
                }
            }
            Ok(Event::Empty(e)) => {
                if is_block(e.local_name().as_ref()) {
                    raw.push('\n');
                }
            }
            Ok(Event::End(e)) => {
                let name = e.local_name();
                if is_skipped(name.as_ref()) {
                    skip_depth = skip_depth.saturating_sub(1);
                } else if is_block(name.as_ref()) {
                    raw.push('\n');
                }
            }
            Ok(Event::Text(t)) if skip_depth == 0 => {
                raw.push_str(&text_of(&t).replace(char::is_whitespace, " "));
            }
            Ok(Event::CData(c)) if skip_depth == 0 => {
                let data = String::from_utf8_lossy(&c);
                raw.push_str(&data.replace(char::is_whitespace, " "));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                debug!(
                    position = reader.buffer_position(),
                    "stopping markup walk early: {}", e
                );
                break;
            }
            _ => {}
        }
    }

    raw.split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
