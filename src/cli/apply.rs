//! Apply command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::resolve_base_dir;
use crate::defaults::{DefaultsProvider, NoDefaults, StaticDefaults};
use crate::update::batch::{self, BatchOptions};

#[derive(Args)]
pub struct ApplyArgs {
    /// Configuration document files (YAML, or .j2 templates)
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,

    /// Base directory containing the configuration store
    #[arg(long, value_name = "DIR", env = "EXTCONFIG_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Delete existing configuration before applying anything
    #[arg(long)]
    pub reset: bool,

    /// Expand file arguments using shell globbing
    #[arg(long)]
    pub glob: bool,

    /// Update from CONFIG_* environment variables after all files are applied
    #[arg(long)]
    pub from_env: bool,

    /// YAML file of known default values for composite keys
    #[arg(long, value_name = "FILE")]
    pub defaults: Option<PathBuf>,

    /// Key namespace prefix the known defaults apply to
    #[arg(long, value_name = "PREFIX", default_value = "", requires = "defaults")]
    pub defaults_prefix: String,
}

pub fn run(args: ApplyArgs) -> Result<()> {
    let base_dir = resolve_base_dir(args.base_dir)?;

    let defaults: Box<dyn DefaultsProvider> = match args.defaults.as_deref() {
        Some(path) => Box::new(StaticDefaults::from_file(path, args.defaults_prefix)?),
        None => Box::new(NoDefaults),
    };

    let options = BatchOptions {
        reset: args.reset,
        glob: args.glob,
        from_env: args.from_env,
        files: args.files,
    };
    batch::run(&base_dir, defaults.as_ref(), &options)?;
    Ok(())
}
