//! Crawled schema catalog
//!
//! The catalog is produced by an external crawler and loaded from a JSON
//! snapshot. It is read-only for the whole lint run.

pub mod builder;
pub mod types;

use std::path::Path;

use thiserror::Error;

pub use types::*;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

impl Catalog {
    /// Load a catalog snapshot from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
            path: display,
            source,
        })
    }
}
