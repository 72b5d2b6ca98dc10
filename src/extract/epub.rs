use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, warn};

use super::markup::xhtml_to_text;
use super::{Archive, ArchiveLimits, ContentItem, DocumentFormat, ExtractError, Extractor};
use crate::security::PathSanitizer;

const CONTAINER_PATH: &str = "META-INF/container.xml";

/// A manifest `<item>` of the OPF package document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestItem {
    pub id: String,
    pub href: String,
    pub media_type: String,
}

impl ManifestItem {
    fn is_xhtml(&self) -> bool {
        matches!(
            self.media_type.as_str(),
            "application/xhtml+xml" | "text/html"
        ) || [".xhtml", ".html", ".htm"]
            .iter()
            .any(|ext| self.href.to_ascii_lowercase().ends_with(ext))
    }
}

/// Reading-order information from an OPF package document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    pub manifest: Vec<ManifestItem>,
    /// `idref`s of the spine, in reading order
    pub spine: Vec<String>,
}

impl Package {
    /// XHTML items in spine order, or manifest order when the spine is empty
    pub fn reading_order(&self) -> Vec<&ManifestItem> {
        if self.spine.is_empty() {
            return self.manifest.iter().filter(|item| item.is_xhtml()).collect();
        }

        self.spine
            .iter()
            .filter_map(|idref| self.manifest.iter().find(|item| &item.id == idref))
            .filter(|item| item.is_xhtml())
            .collect()
    }
}

/// EPUB books: spine documents with markup stripped, one item per document
pub struct EpubExtractor {
    limits: ArchiveLimits,
}

impl EpubExtractor {
    pub fn new(limits: ArchiveLimits) -> Self {
        Self { limits }
    }

    /// `full-path` of the first `<rootfile>` in `META-INF/container.xml`
    pub fn rootfile_path(container_xml: &str) -> Result<Option<String>, ExtractError> {
        let mut reader = Reader::from_str(container_xml);

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e))
                    if e.local_name().as_ref() == b"rootfile" =>
                {
                    return Ok(attribute(&e, b"full-path"));
                }
                Ok(Event::Eof) => return Ok(None),
                Err(e) => return Err(malformed(CONTAINER_PATH, e)),
                _ => {}
            }
        }
    }

    /// Manifest and spine of an OPF package document
    pub fn parse_package(opf_path: &str, opf: &str) -> Result<Package, ExtractError> {
        let mut reader = Reader::from_str(opf);
        let mut package = Package::default();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                    b"item" => {
                        let (Some(id), Some(href)) = (attribute(&e, b"id"), attribute(&e, b"href"))
                        else {
                            continue;
                        };
                        package.manifest.push(ManifestItem {
                            id,
                            href,
                            media_type: attribute(&e, b"media-type").unwrap_or_default(),
                        });
                    }
                    b"itemref" => package.spine.extend(attribute(&e, b"idref")),
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(malformed(opf_path, e)),
                _ => {}
            }
        }

        Ok(package)
    }

    /// Locate the package document, falling back to the first `.opf` entry
    fn find_package_path(archive: &Archive) -> Result<String, ExtractError> {
        if let Some(container) = archive.get_text(CONTAINER_PATH) {
            if let Some(path) = Self::rootfile_path(&container)? {
                return PathSanitizer::sanitize(&path);
            }
        }

        archive
            .names()
            .iter()
            .find(|name| name.to_ascii_lowercase().ends_with(".opf"))
            .cloned()
            .ok_or_else(|| ExtractError::MissingEntry("OPF package document".to_string()))
    }
}

impl Default for EpubExtractor {
    fn default() -> Self {
        Self::new(ArchiveLimits::default())
    }
}

impl Extractor for EpubExtractor {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Epub
    }

    fn extract(&self, bytes: &[u8]) -> Result<Vec<ContentItem>, ExtractError> {
        let archive = Archive::open(bytes, self.limits)?;
        let opf_path = Self::find_package_path(&archive)?;
        let opf = archive.require_text(&opf_path)?;
        let package = Self::parse_package(&opf_path, &opf)?;
        let base_dir = PathSanitizer::parent_dir(&opf_path);

        let mut items = Vec::new();
        for entry in package.reading_order() {
            let href = urlencoding::decode(&entry.href)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| entry.href.clone());

            let path = match PathSanitizer::resolve_relative(base_dir, &href) {
                Ok(path) => path,
                Err(e) => {
                    warn!(href = %entry.href, "skipping spine item: {}", e);
                    continue;
                }
            };

            let Some(xhtml) = archive.get_text(&path) else {
                warn!(path = %path, "spine item missing from archive");
                continue;
            };

            let text = xhtml_to_text(&xhtml);
            if !text.is_empty() {
                items.push(ContentItem::text(text));
            }
        }

        debug!(
            entries = archive.entry_count(),
            documents = items.len(),
            "extracted epub text"
        );
        Ok(items)
    }
}

/// Unescaped value of the attribute whose local name is `name`
fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == name)
        .and_then(|attr| attr.unescape_value().ok().map(|value| value.into_owned()))
}

fn malformed(entry: &str, error: quick_xml::Error) -> ExtractError {
    ExtractError::MalformedXml {
        entry: entry.to_string(),
        message: error.to_string(),
    }
}
