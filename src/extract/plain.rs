use super::{ContentItem, DocumentFormat, ExtractError, Extractor};

/// Fallback extractor for plain text and unrecognised files
pub struct PlainTextExtractor;

impl Extractor for PlainTextExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Text
    }

    fn extract(&self, bytes: &[u8]) -> Result<Vec<ContentItem>, ExtractError> {
        let text = match std::str::from_utf8(bytes) {
            // Valid UTF-8: use as-is, minus a byte order mark
            Ok(text) => text.trim_start_matches('\u{FEFF}').to_string(),
            // Binary or invalid UTF-8: keep printable ASCII
            Err(_) => Self::extract_printable(bytes),
        };

        if text.is_empty() {
            return Ok(vec![]);
        }

        Ok(vec![ContentItem::text(text)])
    }
}

impl PlainTextExtractor {
    /// Extract printable ASCII from binary data
    fn extract_printable(bytes: &[u8]) -> String {
        bytes
            .iter()
            .filter(|&&b| b.is_ascii_graphic() || b.is_ascii_whitespace())
            .map(|&b| b as char)
            .collect()
    }
}
