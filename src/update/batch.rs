//! Batch application of configuration sources.
//!
//! Order: reset (if requested), then each document argument in argument
//! order, then an optional environment sync. The store is opened per
//! top-level operation and released on every exit path; the first error
//! aborts the batch, leaving earlier writes in place.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::defaults::DefaultsProvider;
use crate::error::{ConfigError, Result};
use crate::source::document::MultiLevelDocument;
use crate::store::{ConfigStore, SqliteStore};

#[derive(Debug, Default)]
pub struct BatchOptions {
    /// Delete existing configuration before applying anything.
    pub reset: bool,
    /// Expand file arguments using shell globbing, matches in sorted order.
    pub glob: bool,
    /// Update from `CONFIG_*` environment variables after all files.
    pub from_env: bool,
    /// Document files (or glob patterns) in application order.
    pub files: Vec<String>,
}

/// Apply a batch of configuration sources to the store under `base_dir`.
pub fn run(base_dir: &Path, defaults: &dyn DefaultsProvider, options: &BatchOptions) -> Result<()> {
    if options.reset {
        let mut store = SqliteStore::open(base_dir)?;
        super::reset(&mut store)?;
        store.close()?;
    }

    for pattern in &options.files {
        for path in expand_files(pattern, options.glob)? {
            debug!("Applying {}", path.display());
            let document = MultiLevelDocument::load(&path)?;
            let mut store = SqliteStore::open(base_dir)?;
            super::apply_document(&mut store, defaults, &document)?;
            store.close()?;
        }
    }

    if options.from_env {
        let mut store = SqliteStore::open(base_dir)?;
        super::update_from_environment(&mut store, std::env::vars())?;
        store.close()?;
    }

    Ok(())
}

/// A file argument as-is, or its sorted glob expansion.
///
/// A pattern matching nothing expands to an empty list and applies nothing.
fn expand_files(pattern: &str, use_glob: bool) -> Result<Vec<PathBuf>> {
    if !use_glob {
        return Ok(vec![PathBuf::from(pattern)]);
    }

    let paths = glob::glob(pattern).map_err(|e| ConfigError::source_parse(pattern, e))?;
    let mut matches: Vec<PathBuf> = paths.filter_map(|entry| entry.ok()).collect();
    matches.sort();
    Ok(matches)
}
