//! Environment variable source.
//!
//! Variables named `CONFIG_<name>` carry configuration values. Key names
//! replace "." with "_" and literal "_" with "__", so the transform back is:
//! a single underscore between two non-underscore characters becomes a dot,
//! then each remaining pair of underscores collapses to one.
//!
//! Examples:
//!   `CONFIG_app_data_dir`               -> `app.data.dir`
//!   `CONFIG_app_web_public_url__filter` -> `app.web.public.url_filter`

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

pub const ENV_PREFIX: &str = "CONFIG_";

static DOT_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^_])_([^_])").expect("valid regex"));

/// Target key for a `CONFIG_*` variable name, or `None` for other variables.
pub fn key_from_var(name: &str) -> Option<String> {
    name.strip_prefix(ENV_PREFIX).map(dotted_key)
}

/// Apply the underscore-to-dot transform to a stripped variable name.
///
/// Replacement is left-to-right and non-overlapping, so a boundary character
/// is never consumed twice.
fn dotted_key(raw: &str) -> String {
    DOT_BOUNDARY.replace_all(raw, "${1}.${2}").replace("__", "_")
}

/// Normalize an environment into sorted (key, value) entries.
///
/// Iteration order over the host environment is undefined, so entries are
/// sorted by key. Each key is set independently downstream, making the order
/// semantically irrelevant.
pub fn from_vars<I>(vars: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut entries = BTreeMap::new();
    for (name, value) in vars {
        if let Some(key) = key_from_var(&name) {
            entries.insert(key, value);
        }
    }
    entries.into_iter().collect()
}
