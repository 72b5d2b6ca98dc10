mod archive;
mod docx;
mod epub;
mod error;
mod markup;
mod pdf;
mod plain;
mod registry;


pub use archive::{Archive, ArchiveLimits};
pub use docx::DocxExtractor;
pub use epub::EpubExtractor;
pub use error::ExtractError;
pub use markup::xhtml_to_text;
pub use pdf::PdfExtractor;
pub use plain::PlainTextExtractor;
pub use registry::ExtractorRegistry;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Core trait that all extractors must implement
pub trait Extractor: Send + Sync {
    /// Format this extractor understands
    fn format(&self) -> DocumentFormat;

    /// Turn raw file bytes into content items, in reading order
    fn extract(&self, bytes: &[u8]) -> Result<Vec<ContentItem>, ExtractError>;
}

/// Source format of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Epub,
    Docx,
    Text,
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Epub => "epub",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Text => "text",
        };
        f.write_str(name)
    }
}

/// Kind of an extracted item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    /// Reserved; no extractor produces images yet
    Image,
}

/// One `(kind, content)` item handed to the pagination core
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub kind: ContentKind,
    pub content: String,
}

impl ContentItem {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Text,
            content: content.into(),
        }
    }
}

/// Join the text items with newlines; other kinds are skipped
pub fn join_text(items: &[ContentItem]) -> String {
    items
        .iter()
        .filter(|item| item.kind == ContentKind::Text)
        .map(|item| item.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
