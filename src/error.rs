//! Error types for schema generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, SchemaGenError>;

/// Schema generation errors
///
/// Failures are contained at the smallest unit that produced them: a broken
/// property contributes nothing (not an error at all), a broken module is
/// counted and skipped, a broken package manifest yields zero documents for
/// that package. Only [`SchemaGenError::OutputDir`] aborts a run.
#[derive(Error, Debug)]
pub enum SchemaGenError {
    #[error("Failed to read package manifest {}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse package manifest {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read node module {}: {source}", path.display())]
    ModuleRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse node module {}: {source}", path.display())]
    ModuleParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
