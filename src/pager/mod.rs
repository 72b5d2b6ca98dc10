//! Pager service: extract, normalize, chunk, group and publish documents,
//! then resolve pages against the live registry.

mod error;

#[cfg(test)]
mod tests;

pub use error::PagerError;

use chrono::Utc;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::PagerConfig;
use crate::extract::{DocumentFormat, ExtractorRegistry, join_text};
use crate::navigator::{PageView, resolve_page};
use crate::registry::{DocumentInfo, Library, RetentionPolicy, SeriesRegistry};
use crate::series::{Series, SeriesId, build_series_with};

/// Outcome of one ingest: the document record and the library it produced
#[derive(Debug, Clone)]
pub struct Ingested {
    pub document: DocumentInfo,
    pub library: Arc<Library>,
}

impl Ingested {
    /// Series of the ingested document, in order
    pub fn series(&self) -> impl Iterator<Item = &Series> {
        self.document
            .series_ids
            .iter()
            .filter_map(|id| self.library.get(id))
    }

    /// First series of the ingested document
    pub fn first_series_id(&self) -> Option<SeriesId> {
        self.document.series_ids.first().copied()
    }
}

/// Owns the series registry and the extractors.
///
/// `Pager` is `Send + Sync`; share it by reference or `Arc`.
pub struct Pager {
    config: PagerConfig,
    extractors: ExtractorRegistry,
    registry: SeriesRegistry,
}

impl Pager {
    /// Create a pager with an empty registry
    pub fn new(config: PagerConfig) -> Result<Self, PagerError> {
        config.validate()?;

        let extractors = ExtractorRegistry::new(config.limits);
        debug!(
            policy = %config.policy,
            extractors = extractors.extractor_count(),
            extensions = ?extractors.registered_extensions(),
            "pager ready"
        );

        Ok(Self {
            extractors,
            registry: SeriesRegistry::new(config.retention),
            config,
        })
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    pub fn extractors(&self) -> &ExtractorRegistry {
        &self.extractors
    }

    /// Split text into series with the configured policy, without publishing
    pub fn build_series(&self, text: &str) -> Vec<Series> {
        build_series_with(
            text,
            &self.config.policy,
            self.config.pages_per_series,
            self.config.locale,
        )
    }

    /// Paginate already-extracted text and publish it.
    ///
    /// Text that yields no pages still publishes, so under
    /// [`RetentionPolicy::Replace`] it empties the registry.
    pub fn ingest_text(&self, source: &str, text: &str, format: DocumentFormat) -> Ingested {
        let series = self.build_series(text);

        let document = DocumentInfo {
            source: source.to_string(),
            format,
            fingerprint: fingerprint(text),
            char_count: text.chars().count(),
            series_ids: series.iter().map(|s| s.id).collect(),
            ingested_at: Utc::now(),
        };

        info!(
            source,
            format = %format,
            series = series.len(),
            pages = series.iter().map(Series::page_count).sum::<usize>(),
            "paginated document"
        );

        let library = self.registry.publish(series, Some(document.clone()));
        Ingested { document, library }
    }

    /// Extract a file with the extractor its extension selects, then ingest it
    pub fn ingest_file(&self, path: &Path) -> Result<Ingested, PagerError> {
        let bytes = fs::read(path).map_err(|source| PagerError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extractor = self.extractors.select(path);
        let items = extractor
            .extract(&bytes)
            .map_err(|source| PagerError::Extract {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            path = %path.display(),
            format = %extractor.format(),
            items = items.len(),
            "extracted document"
        );

        let text = join_text(&items);
        Ok(self.ingest_text(&path.display().to_string(), &text, extractor.format()))
    }

    /// Ingest files and directories in order.
    ///
    /// Files named directly are always ingested; directories contribute
    /// their supported files, sorted by name, hidden entries skipped.
    pub fn ingest_paths(&self, paths: &[PathBuf]) -> Result<Vec<Ingested>, PagerError> {
        let files = self.collect_files(paths)?;

        if files.len() > 1 && self.registry.retention() == RetentionPolicy::Replace {
            warn!(
                files = files.len(),
                "retention is replace; only the last document stays live"
            );
        }

        files.iter().map(|file| self.ingest_file(file)).collect()
    }

    /// Expand directories into the supported files beneath them
    pub fn collect_files(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>, PagerError> {
        let mut files = Vec::new();

        for path in paths {
            if !path.is_dir() {
                files.push(path.clone());
                continue;
            }

            for entry in WalkDir::new(path)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
            {
                let entry = entry.map_err(|source| PagerError::Walk {
                    path: path.clone(),
                    source,
                })?;

                if entry.file_type().is_file() && self.extractors.supports(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        }

        Ok(files)
    }

    /// Current library; stays valid across later publishes
    pub fn snapshot(&self) -> Arc<Library> {
        self.registry.snapshot()
    }

    /// Drop every series
    pub fn clear(&self) {
        self.registry.clear();
    }

    /// Resolve a 1-based page of a series in the live registry
    pub fn resolve_page(
        &self,
        series_id: SeriesId,
        page_number: usize,
    ) -> Result<PageView, PagerError> {
        Ok(resolve_page(&self.snapshot(), series_id, page_number)?)
    }

    /// Resolve a page by the series' 1-based insertion position
    pub fn resolve_position(
        &self,
        position: usize,
        page_number: usize,
    ) -> Result<PageView, PagerError> {
        let library = self.snapshot();
        let series_id = position
            .checked_sub(1)
            .and_then(|index| library.at(index))
            .map(|series| series.id)
            .ok_or(PagerError::NoSuchPosition {
                position,
                total: library.len(),
            })?;

        Ok(resolve_page(&library, series_id, page_number)?)
    }

    /// First page of the earliest series, or `None` when nothing is published
    pub fn first_page(&self) -> Result<Option<PageView>, PagerError> {
        let library = self.snapshot();
        match library.first() {
            Some(series) => Ok(Some(resolve_page(&library, series.id, 1)?)),
            None => Ok(None),
        }
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            extractors: ExtractorRegistry::default(),
            registry: SeriesRegistry::default(),
            config: PagerConfig::default(),
        }
    }
}

/// Hex SHA-256 of extracted text
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}
