//! extconfig: merge external configuration sources into a persisted store
//!
//! This tool applies configuration documents and CONFIG_* environment
//! variables to a key-value store, merging list and mapping values instead of
//! blindly overwriting them.

use anyhow::Result;

fn main() -> Result<()> {
    extconfig::cli::run()
}
