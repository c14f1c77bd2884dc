//! Error types for configuration loading and merging.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A merge was requested between incompatible value shapes.
    #[error("cannot merge key {key}: expected a {expected}, found a {found}")]
    TypeMismatch { key: String, expected: &'static str, found: &'static str },

    /// The stored content for a key is not a JSON list or mapping.
    #[error("stored value for key {key} is not a JSON list or mapping: {detail}")]
    InvalidStoredValue { key: String, detail: String },

    /// The defaults lookup failed or produced a non-composite value.
    #[error("cannot resolve default value for key {key}: {detail}")]
    DefaultResolution { key: String, detail: String },

    /// A document file could not be rendered or parsed.
    #[error("failed to parse {}: {}", .path.display(), .detail)]
    SourceParse { path: PathBuf, detail: String },

    /// The base directory holding the store is absent or not a directory.
    #[error("configuration directory {} does not exist", .0.display())]
    MissingBaseDir(PathBuf),

    #[error("configuration store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn source_parse(path: impl Into<PathBuf>, detail: impl ToString) -> Self {
        ConfigError::SourceParse { path: path.into(), detail: detail.to_string() }
    }
}
