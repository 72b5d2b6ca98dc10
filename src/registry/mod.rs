mod library;


pub use library::{DocumentInfo, Library};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::series::Series;

/// What publishing does to series already in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetentionPolicy {
    /// Each publish clears the registry first: one live document at a time
    #[default]
    Replace,
    /// Each publish appends after the existing series
    Accumulate,
}

impl fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetentionPolicy::Replace => write!(f, "replace"),
            RetentionPolicy::Accumulate => write!(f, "accumulate"),
        }
    }
}

impl FromStr for RetentionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "replace" => Ok(RetentionPolicy::Replace),
            "accumulate" => Ok(RetentionPolicy::Accumulate),
            other => Err(format!("unknown retention policy: {}", other)),
        }
    }
}

/// Process-wide store of series, owned by whoever constructs it.
///
/// The current [`Library`] is swapped as a whole under the write lock, so a
/// reader holding a snapshot always sees a complete registry: either the
/// one before a publish or the one after it.
pub struct SeriesRegistry {
    retention: RetentionPolicy,
    current: RwLock<Arc<Library>>,
}

impl SeriesRegistry {
    /// Create an empty registry
    pub fn new(retention: RetentionPolicy) -> Self {
        Self {
            retention,
            current: RwLock::new(Arc::new(Library::default())),
        }
    }

    pub fn retention(&self) -> RetentionPolicy {
        self.retention
    }

    /// Current library; cheap to take and safe to hold across publishes
    pub fn snapshot(&self) -> Arc<Library> {
        Arc::clone(&self.current.read())
    }

    /// Insert a document's series, clearing or appending per the retention policy.
    ///
    /// Returns the library that is now live.
    pub fn publish(&self, series: Vec<Series>, document: Option<DocumentInfo>) -> Arc<Library> {
        let added = series.len();
        let mut current = self.current.write();

        let next = match self.retention {
            RetentionPolicy::Replace => Library::from_series(series, document),
            RetentionPolicy::Accumulate => current.with_appended(series, document),
        };
        let next = Arc::new(next);
        *current = Arc::clone(&next);

        info!(
            retention = %self.retention,
            added,
            total = next.len(),
            "published series"
        );
        next
    }

    /// Drop every series
    pub fn clear(&self) {
        *self.current.write() = Arc::new(Library::default());
    }
}

impl Default for SeriesRegistry {
    fn default() -> Self {
        Self::new(RetentionPolicy::default())
    }
}
