//! Jinja2 preprocessing for templated document files.
//!
//! A document whose file name ends in `.j2` is rendered before parsing. No
//! variables are passed in, so templating is mostly useful for expanding
//! filters such as `| default(...)`.

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::{context, Environment};

use crate::error::{ConfigError, Result};

pub const TEMPLATE_EXT: &str = "j2";

/// Whether `path` follows the template file-name convention.
pub fn is_template(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == TEMPLATE_EXT)
}

/// Render a `.j2` file into `out_dir`, returning the rendered file's path.
///
/// The output file name is the input name with the `.j2` suffix stripped.
pub fn render_template(path: &Path, out_dir: &Path) -> Result<PathBuf> {
    let stem = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(".j2"))
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| ConfigError::source_parse(path, "not a .j2 template file name"))?;

    let source = fs::read_to_string(path).map_err(|e| ConfigError::source_parse(path, e))?;

    let env = Environment::new();
    let rendered = env
        .template_from_str(&source)
        .and_then(|template| template.render(context! {}))
        .map_err(|e| ConfigError::source_parse(path, e))?;

    let out_path = out_dir.join(stem);
    fs::write(&out_path, rendered).map_err(|e| ConfigError::source_parse(path, e))?;
    Ok(out_path)
}
