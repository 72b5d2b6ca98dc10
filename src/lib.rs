// Public API exports
pub mod chunker;
pub mod config;
pub mod export;
pub mod extract;
pub mod navigator;
pub mod normalizer;
pub mod pager;
pub mod registry;
pub mod security;
pub mod series;

// Re-export main types for convenience
pub use chunker::{
    ChunkPolicy, split_by_lines, split_by_sentence, split_fixed_width, split_hybrid,
    split_sentences,
};
pub use config::{ConfigError, PagerConfig, PolicyOverrides};
pub use export::Manifest;
pub use extract::{
    ContentItem, ContentKind, DocumentFormat, ExtractError, Extractor, ExtractorRegistry,
};
pub use navigator::{NavigationError, PageView, resolve_page};
pub use normalizer::normalize;
pub use pager::{Ingested, Pager, PagerError};
pub use registry::{DocumentInfo, Library, RetentionPolicy, SeriesRegistry};
pub use security::PathSanitizer;
pub use series::{
    OrdinalLocale, Series, SeriesId, build_series, build_series_with, group_into_series,
    ordinal_label,
};
