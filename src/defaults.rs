//! Known-default lookup for composite keys.
//!
//! Some key namespaces have baseline list/mapping values supplied by the
//! surrounding application. The merger consults a provider for such keys when
//! nothing is stored yet, so appends land on top of the baseline rather than
//! replacing it. The provider is injected; the core carries no application
//! defaults of its own.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::merge::{shape_of, CompositeValue};

pub trait DefaultsProvider {
    /// Baseline composite for `key`, or `None` when the key has no known
    /// default. Keys outside the provider's namespace always resolve to
    /// `None`. A lookup that fails, or yields a scalar, is an error.
    fn default_for(&self, key: &str) -> Result<Option<CompositeValue>>;
}

/// Provider with no known defaults.
pub struct NoDefaults;

impl DefaultsProvider for NoDefaults {
    fn default_for(&self, _key: &str) -> Result<Option<CompositeValue>> {
        Ok(None)
    }
}

/// Table-backed provider restricted to a key namespace prefix.
#[derive(Debug)]
pub struct StaticDefaults {
    prefix: String,
    table: HashMap<String, Value>,
}

impl StaticDefaults {
    pub fn new(prefix: impl Into<String>, table: HashMap<String, Value>) -> Self {
        Self { prefix: prefix.into(), table }
    }

    /// Load a defaults table from a YAML file containing a mapping of
    /// key to list-or-mapping value.
    pub fn from_file(path: &Path, prefix: impl Into<String>) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::source_parse(path, e))?;
        let table: HashMap<String, Value> = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::source_parse(path, e))?;
        Ok(Self::new(prefix, table))
    }
}

impl DefaultsProvider for StaticDefaults {
    fn default_for(&self, key: &str) -> Result<Option<CompositeValue>> {
        if !key.starts_with(&self.prefix) {
            return Ok(None);
        }
        let Some(value) = self.table.get(key) else {
            return Ok(None);
        };
        let shape = shape_of(value);
        match CompositeValue::from_value(value.clone()) {
            Some(composite) => Ok(Some(composite)),
            None => Err(ConfigError::DefaultResolution {
                key: key.to_string(),
                detail: format!("expected a list or mapping, found a {shape}"),
            }),
        }
    }
}
