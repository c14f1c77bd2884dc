//! Reset command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::resolve_base_dir;
use crate::store::{ConfigStore, SqliteStore};
use crate::update;

#[derive(Args)]
pub struct ResetArgs {
    /// Base directory containing the configuration store
    #[arg(long, value_name = "DIR", env = "EXTCONFIG_DIR")]
    pub base_dir: Option<PathBuf>,
}

pub fn run(args: ResetArgs) -> Result<()> {
    let base_dir = resolve_base_dir(args.base_dir)?;

    let mut store = SqliteStore::open(&base_dir)?;
    update::reset(&mut store)?;
    store.close()?;

    println!("Configuration cleared");
    Ok(())
}
