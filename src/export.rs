use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::chunker::ChunkPolicy;
use crate::config::PagerConfig;
use crate::registry::{DocumentInfo, Library, RetentionPolicy};
use crate::series::{OrdinalLocale, SeriesId};

pub const MANIFEST_VERSION: &str = "1.0.0";

/// JSON snapshot of a library. Written, never read back.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub version: String,
    pub created_at: String,
    pub generator: String,
    pub policy: ChunkPolicy,
    pub pages_per_series: usize,
    pub locale: OrdinalLocale,
    pub retention: RetentionPolicy,
    pub stats: ManifestStats,
    pub documents: Vec<DocumentInfo>,
    pub series: Vec<SeriesEntry>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ManifestStats {
    pub document_count: usize,
    pub series_count: usize,
    pub page_count: usize,
}

#[derive(Debug, Serialize)]
pub struct SeriesEntry {
    pub id: SeriesId,
    pub title: String,
    pub page_count: usize,
    pub pages: Vec<String>,
}

impl Manifest {
    /// Snapshot `library` along with the settings that produced it
    pub fn from_library(library: &Library, config: &PagerConfig) -> Self {
        let series: Vec<SeriesEntry> = library
            .iter()
            .map(|s| SeriesEntry {
                id: s.id,
                title: s.title.clone(),
                page_count: s.page_count(),
                pages: s.pages.clone(),
            })
            .collect();

        Manifest {
            version: MANIFEST_VERSION.to_string(),
            created_at: Utc::now().to_rfc3339(),
            generator: format!("docpager v{}", env!("CARGO_PKG_VERSION")),
            policy: config.policy,
            pages_per_series: config.pages_per_series,
            locale: config.locale,
            retention: config.retention,
            stats: ManifestStats {
                document_count: library.documents().len(),
                series_count: library.len(),
                page_count: library.page_count(),
            },
            documents: library.documents().to_vec(),
            series,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize manifest")
    }

    /// Write the manifest as pretty JSON, replacing any existing file
    pub fn write_to_file(&self, output_path: &Path) -> Result<()> {
        let json = self.to_json()?;

        let mut file = File::create(output_path)
            .with_context(|| format!("Failed to create output file: {}", output_path.display()))?;
        file.write_all(json.as_bytes())
            .context("Failed to write manifest")?;
        file.write_all(b"\n")
            .context("Failed to write manifest")?;

        info!(
            path = %output_path.display(),
            series = self.stats.series_count,
            pages = self.stats.page_count,
            "wrote manifest"
        );
        Ok(())
    }
}
