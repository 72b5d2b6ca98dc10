use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use tracing::warn;

use super::ExtractError;
use crate::security::PathSanitizer;

/// Size caps applied while inflating ZIP-based documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveLimits {
    /// Largest single inflated entry, in bytes
    pub max_entry_size: u64,
    /// Largest inflated total, in bytes
    pub max_total_size: u64,
}

impl Default for ArchiveLimits {
    fn default() -> Self {
        Self {
            max_entry_size: 50 * 1024 * 1024,  // 50 MB per entry
            max_total_size: 500 * 1024 * 1024, // 500 MB total
        }
    }
}

/// Metadata for a single entry in the archive arena
#[derive(Debug, Clone)]
struct Entry {
    offset: usize,
    length: usize,
}

/// Inflated contents of a ZIP container, held in one contiguous arena
pub struct Archive {
    arena: Vec<u8>,
    index: HashMap<String, Entry>,
    /// Sanitized names in archive order
    names: Vec<String>,
}

impl Archive {
    /// Inflate every file entry of a ZIP held in memory.
    ///
    /// Entry names are sanitized; entries with unsafe names are skipped.
    /// Exceeding either size limit fails the whole archive.
    pub fn open(bytes: &[u8], limits: ArchiveLimits) -> Result<Self, ExtractError> {
        let mut reader = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ExtractError::ZipParseFailed(e.to_string()))?;

        let mut archive = Archive {
            arena: Vec::new(),
            index: HashMap::new(),
            names: Vec::new(),
        };

        for i in 0..reader.len() {
            let file = reader
                .by_index(i)
                .map_err(|e| ExtractError::ZipParseFailed(e.to_string()))?;

            if file.is_dir() {
                continue;
            }

            let virtual_path = match PathSanitizer::sanitize(file.name()) {
                Ok(path) => path,
                Err(e) => {
                    warn!(entry = file.name(), "skipping archive entry: {}", e);
                    continue;
                }
            };

            // Declared size first, then the bytes actually inflated
            if file.size() > limits.max_entry_size {
                return Err(ExtractError::EntryTooLarge {
                    size: file.size(),
                    max: limits.max_entry_size,
                });
            }

            let mut contents = Vec::new();
            file.take(limits.max_entry_size + 1)
                .read_to_end(&mut contents)
                .map_err(|e| ExtractError::ZipParseFailed(e.to_string()))?;

            archive.add_entry(virtual_path, &contents, limits)?;
        }

        Ok(archive)
    }

    fn add_entry(
        &mut self,
        virtual_path: String,
        data: &[u8],
        limits: ArchiveLimits,
    ) -> Result<(), ExtractError> {
        if data.len() as u64 > limits.max_entry_size {
            return Err(ExtractError::EntryTooLarge {
                size: data.len() as u64,
                max: limits.max_entry_size,
            });
        }

        let new_total = self.arena.len() as u64 + data.len() as u64;
        if new_total > limits.max_total_size {
            return Err(ExtractError::ArchiveTooLarge {
                size: new_total,
                max: limits.max_total_size,
            });
        }

        let offset = self.arena.len();
        self.arena.extend_from_slice(data);

        if self
            .index
            .insert(
                virtual_path.clone(),
                Entry {
                    offset,
                    length: data.len(),
                },
            )
            .is_none()
        {
            self.names.push(virtual_path);
        }

        Ok(())
    }

    /// An entry's bytes (zero-copy)
    pub fn get(&self, virtual_path: &str) -> Option<&[u8]> {
        self.index
            .get(virtual_path)
            .and_then(|entry| self.arena.get(entry.offset..entry.offset + entry.length))
    }

    /// An entry decoded as UTF-8, replacing invalid sequences
    pub fn get_text(&self, virtual_path: &str) -> Option<String> {
        self.get(virtual_path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Like [`Archive::get_text`], but a missing entry is an error
    pub fn require_text(&self, virtual_path: &str) -> Result<String, ExtractError> {
        self.get_text(virtual_path)
            .ok_or_else(|| ExtractError::MissingEntry(virtual_path.to_string()))
    }

    /// Sanitized entry names in archive order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn entry_count(&self) -> usize {
        self.names.len()
    }

    /// Total inflated bytes
    pub fn total_size(&self) -> usize {
        self.arena.len()
    }
}
