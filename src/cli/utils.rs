//! Shared CLI utilities.

use anyhow::Result;
use std::path::PathBuf;

/// Resolve the base directory holding the configuration store.
///
/// Comes from `--base-dir` or the `EXTCONFIG_DIR` environment variable (clap
/// fills either into the same argument) and must be an existing directory.
pub fn resolve_base_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
    let Some(dir) = base_dir else {
        anyhow::bail!("base directory not set (use --base-dir or EXTCONFIG_DIR)");
    };
    if !dir.is_dir() {
        anyhow::bail!("base directory {} does not exist", dir.display());
    }
    Ok(dir)
}
