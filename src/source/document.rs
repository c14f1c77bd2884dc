//! Multi-level document parsing.
//!
//! A document is a YAML mapping from top-level operation keys to sections of
//! target-key/value pairs. The operation key's suffix selects the semantics:
//! `_set` overwrites, `_append` appends/merges, anything else is ignored with
//! a warning at apply time. Top-level keys are held sorted so processing
//! order is deterministic regardless of file order.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};
use crate::source::template;

#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    /// `*_set`: scalar-set every entry.
    Set(Map<String, Value>),
    /// `*_append`: merge every entry into the current composite.
    Append(Map<String, Value>),
    /// Unrecognized suffix; warned about, never applied.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct MultiLevelDocument {
    origin: PathBuf,
    sections: BTreeMap<String, Section>,
}

impl MultiLevelDocument {
    /// Load a document from disk, rendering `.j2` templates first.
    pub fn load(path: &Path) -> Result<Self> {
        let content = if template::is_template(path) {
            let tmpdir = tempfile::tempdir()?;
            let rendered = template::render_template(path, tmpdir.path())?;
            fs::read_to_string(&rendered).map_err(|e| ConfigError::source_parse(path, e))?
        } else {
            fs::read_to_string(path).map_err(|e| ConfigError::source_parse(path, e))?
        };
        Self::parse_str(&content, path)
    }

    /// Parse document content, attributing errors to `origin`.
    pub fn parse_str(content: &str, origin: &Path) -> Result<Self> {
        let top: BTreeMap<String, Value> =
            serde_yaml::from_str(content).map_err(|e| ConfigError::source_parse(origin, e))?;

        let mut sections = BTreeMap::new();
        for (key, value) in top {
            let section = if key.ends_with("_append") {
                Section::Append(require_mapping(origin, &key, value)?)
            } else if key.ends_with("_set") {
                Section::Set(require_mapping(origin, &key, value)?)
            } else {
                Section::Ignored
            };
            sections.insert(key, section);
        }
        Ok(Self { origin: origin.to_path_buf(), sections })
    }

    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// Sections in ascending top-level key order.
    pub fn sections(&self) -> impl Iterator<Item = (&String, &Section)> {
        self.sections.iter()
    }
}

fn require_mapping(origin: &Path, key: &str, value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(entries) => Ok(entries),
        _ => Err(ConfigError::source_parse(
            origin,
            format!("top-level key {key} must contain a mapping"),
        )),
    }
}
