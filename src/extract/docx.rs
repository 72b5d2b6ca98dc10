use quick_xml::events::Event;
use quick_xml::Reader;

use super::markup::text_of;
use super::{Archive, ArchiveLimits, ContentItem, DocumentFormat, ExtractError, Extractor};

const DOCUMENT_PART: &str = "word/document.xml";

/// Word documents: the paragraphs of `word/document.xml`
pub struct DocxExtractor {
    limits: ArchiveLimits,
}

impl DocxExtractor {
    pub fn new(limits: ArchiveLimits) -> Self {
        Self { limits }
    }

    /// Paragraph texts of a WordprocessingML body, empty paragraphs included
    pub fn paragraphs(document_xml: &str) -> Result<Vec<String>, ExtractError> {
        let mut reader = Reader::from_str(document_xml);
        let mut paragraphs = Vec::new();
        let mut current = String::new();
        let mut in_text_run = false;
        // <w:tabs> holds tab stop definitions, not tab characters
        let mut in_tab_stops = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"p" => current.clear(),
                    b"t" => in_text_run = true,
                    b"tabs" => in_tab_stops = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                    b"tab" if !in_tab_stops => current.push('\t'),
                    b"br" | b"cr" => current.push('\n'),
                    b"p" => paragraphs.push(String::new()),
                    _ => {}
                },
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"t" => in_text_run = false,
                    b"tabs" => in_tab_stops = false,
                    b"p" => paragraphs.push(std::mem::take(&mut current)),
                    _ => {}
                },
                Ok(Event::Text(t)) if in_text_run => current.push_str(&text_of(&t)),
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ExtractError::MalformedXml {
                        entry: DOCUMENT_PART.to_string(),
                        message: e.to_string(),
                    });
                }
                _ => {}
            }
        }

        Ok(paragraphs)
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new(ArchiveLimits::default())
    }
}

impl Extractor for DocxExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn extract(&self, bytes: &[u8]) -> Result<Vec<ContentItem>, ExtractError> {
        let archive = Archive::open(bytes, self.limits)?;
        let document = archive.require_text(DOCUMENT_PART)?;
        let paragraphs = Self::paragraphs(&document)?;

        if paragraphs.iter().all(|p| p.trim().is_empty()) {
            return Ok(vec![]);
        }

        Ok(vec![ContentItem::text(paragraphs.join("\n"))])
    }
}
