//! List command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::resolve_base_dir;
use crate::store::{ConfigStore, SqliteStore};

#[derive(Args)]
pub struct ListArgs {
    /// Base directory containing the configuration store
    #[arg(long, value_name = "DIR", env = "EXTCONFIG_DIR")]
    pub base_dir: Option<PathBuf>,
}

pub fn run(args: ListArgs) -> Result<()> {
    let base_dir = resolve_base_dir(args.base_dir)?;

    let store = SqliteStore::open(&base_dir)?;
    for key in store.keys()? {
        if let Some(value) = store.get(&key)? {
            println!("{key}={value}");
        }
    }
    store.close()?;
    Ok(())
}
