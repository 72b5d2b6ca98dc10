use super::{
    ArchiveLimits, DocxExtractor, EpubExtractor, Extractor, PdfExtractor, PlainTextExtractor,
};
use std::collections::HashMap;
use std::path::Path;

/// Dynamic dispatch table for document extractors
pub struct ExtractorRegistry {
    /// Fallback extractor for unknown extensions
    fallback: Box<dyn Extractor>,
    /// Extension -> Extractor mapping
    map: HashMap<String, Box<dyn Extractor>>,
}

impl ExtractorRegistry {
    /// Create a registry with only the plain-text fallback
    pub fn empty() -> Self {
        Self {
            fallback: Box::new(PlainTextExtractor),
            map: HashMap::new(),
        }
    }

    /// Create a registry with the PDF, EPUB and Word extractors registered
    pub fn new(limits: ArchiveLimits) -> Self {
        let mut registry = Self::empty();
        registry.register("pdf", PdfExtractor);
        registry.register("epub", EpubExtractor::new(limits));
        registry.register("docx", DocxExtractor::new(limits));
        registry.register("doc", DocxExtractor::new(limits));
        registry
    }

    /// Register an extractor for a file extension (without the dot)
    pub fn register(&mut self, extension: impl Into<String>, extractor: impl Extractor + 'static) {
        self.map
            .insert(extension.into().to_lowercase(), Box::new(extractor));
    }

    /// Select the extractor for a path by its extension.
    ///
    /// Falls back to plain text if no extension-specific extractor exists
    pub fn select(&self, path: &Path) -> &dyn Extractor {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        self.map.get(&ext).map(|e| &**e).unwrap_or(&*self.fallback)
    }

    /// Whether a path has a dedicated (non-fallback) extractor
    pub fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.map.contains_key(&ext.to_lowercase()))
    }

    /// Extensions with a dedicated extractor; the plain-text fallback is not counted
    pub fn extractor_count(&self) -> usize {
        self.map.len()
    }

    /// Lowercased extensions with a dedicated extractor, in byte order
    pub fn registered_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.map.keys().map(|s| s.as_str()).collect();
        extensions.sort_unstable();
        extensions
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new(ArchiveLimits::default())
    }
}
