//! Store update operations.
//!
//! Scalar values overwrite unconditionally; composite values merge with the
//! current state (or a known default) before being written back. Errors abort
//! the current batch entry and propagate with the offending key; nothing is
//! retried or silently skipped.

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::defaults::DefaultsProvider;
use crate::error::{ConfigError, Result};
use crate::merge::{canonical_json, merge_value, shape_of, CompositeValue};
use crate::source::document::{MultiLevelDocument, Section};
use crate::source::env;
use crate::store::ConfigStore;

pub mod batch;

/// Set `key` unconditionally.
///
/// Plain strings are stored verbatim; every other value is stored as its
/// canonical JSON encoding.
pub fn set_scalar<S: ConfigStore>(store: &mut S, key: &str, value: &Value) -> Result<()> {
    let encoded = match value {
        Value::String(s) => s.clone(),
        other => canonical_json(other)?,
    };
    info!("Setting: {}={}", key, encoded);
    store.set(key, &encoded)
}

/// Merge a composite value into `key` and persist the result.
///
/// The store entry is left unchanged when the merge fails.
pub fn append_composite<S: ConfigStore>(
    store: &mut S,
    defaults: &dyn DefaultsProvider,
    key: &str,
    value: CompositeValue,
) -> Result<()> {
    let current = store.get(key)?;
    let merged = merge_value(current.as_deref(), defaults, key, value)?;
    let encoded = merged.to_canonical_json()?;
    info!("Merging: {}={}", key, encoded);
    store.set(key, &encoded)
}

/// Scalar-set every entry of a dictionary.
pub fn update_from_dict<S: ConfigStore>(store: &mut S, values: &Map<String, Value>) -> Result<()> {
    for (key, value) in values {
        set_scalar(store, key, value)?;
    }
    Ok(())
}

/// Merge every entry of a dictionary whose values are lists or mappings.
pub fn append_from_dict<S: ConfigStore>(
    store: &mut S,
    defaults: &dyn DefaultsProvider,
    values: &Map<String, Value>,
) -> Result<()> {
    for (key, value) in values {
        let composite =
            CompositeValue::from_value(value.clone()).ok_or_else(|| ConfigError::TypeMismatch {
                key: key.clone(),
                expected: "list or mapping",
                found: shape_of(value),
            })?;
        append_composite(store, defaults, key, composite)?;
    }
    Ok(())
}

/// Apply a multi-level document, processing sections in ascending key order.
pub fn apply_document<S: ConfigStore>(
    store: &mut S,
    defaults: &dyn DefaultsProvider,
    document: &MultiLevelDocument,
) -> Result<()> {
    for (top_key, section) in document.sections() {
        match section {
            Section::Append(entries) => append_from_dict(store, defaults, entries)?,
            Section::Set(entries) => update_from_dict(store, entries)?,
            Section::Ignored => warn!("Ignoring top-level key {}", top_key),
        }
    }
    Ok(())
}

/// Scalar-set every `CONFIG_*` entry of an environment.
pub fn update_from_environment<S, I>(store: &mut S, vars: I) -> Result<()>
where
    S: ConfigStore,
    I: IntoIterator<Item = (String, String)>,
{
    for (key, value) in env::from_vars(vars) {
        set_scalar(store, &key, &Value::String(value))?;
    }
    Ok(())
}

/// Delete every stored key.
pub fn reset<S: ConfigStore>(store: &mut S) -> Result<()> {
    info!("Deleting all configuration keys");
    store.remove_all()
}
