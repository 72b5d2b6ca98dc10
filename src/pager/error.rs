use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;
use crate::extract::ExtractError;
use crate::navigator::NavigationError;

#[derive(Error, Debug)]
pub enum PagerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to extract {path}: {source}")]
    Extract {
        path: PathBuf,
        #[source]
        source: ExtractError,
    },

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error("No series at position {position} (library has {total})")]
    NoSuchPosition { position: usize, total: usize },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
