use tracing::debug;

use super::{ContentItem, DocumentFormat, ExtractError, Extractor};

/// PDF text via `pdf-extract`
pub struct PdfExtractor;

impl PdfExtractor {
    /// Join the pages of `pdf-extract` output with blank lines.
    ///
    /// `pdf-extract` separates pages with form feeds. Blank pages are
    /// dropped and newlines at the edges of each page are trimmed, so every
    /// page boundary survives normalization as a paragraph break.
    pub fn join_pages(raw: &str) -> String {
        raw.split('\x0C')
            .map(|page| page.trim_matches(['\n', '\r']))
            .filter(|page| !page.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Extractor for PdfExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn extract(&self, bytes: &[u8]) -> Result<Vec<ContentItem>, ExtractError> {
        let raw = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractError::PdfFailed(e.to_string()))?;

        let text = Self::join_pages(&raw);
        debug!(pages = raw.split('\x0C').count(), "extracted pdf text");

        if text.is_empty() {
            return Ok(vec![]);
        }
        Ok(vec![ContentItem::text(text)])
    }
}
