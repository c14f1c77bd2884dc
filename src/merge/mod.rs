//! Composite value merging.
//!
//! Lists are appended (existing items first), mappings are shallow-overlaid
//! (new keys win). Everything else is a type mismatch. The merge itself is
//! pure; callers read the current raw value from the store and persist the
//! result.

use serde_json::{Map, Value};

use crate::defaults::DefaultsProvider;
use crate::error::{ConfigError, Result};

/// A value that is stored JSON-encoded: a list or a mapping.
///
/// Scalar strings are stored verbatim and never pass through here.
#[derive(Debug, Clone, PartialEq)]
pub enum CompositeValue {
    List(Vec<Value>),
    Map(Map<String, Value>),
}

impl CompositeValue {
    /// Classify a JSON value, returning `None` for scalars.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(CompositeValue::List(items)),
            Value::Object(entries) => Some(CompositeValue::Map(entries)),
            _ => None,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            CompositeValue::List(items) => Value::Array(items),
            CompositeValue::Map(entries) => Value::Object(entries),
        }
    }

    pub fn shape(&self) -> &'static str {
        match self {
            CompositeValue::List(_) => "list",
            CompositeValue::Map(_) => "mapping",
        }
    }

    /// Canonical JSON encoding: keys sorted, non-ASCII preserved.
    ///
    /// `serde_json` maps are ordered by key and output is UTF-8, so the
    /// default serializer already produces the canonical form.
    pub fn to_canonical_json(&self) -> Result<String> {
        match self {
            CompositeValue::List(items) => Ok(serde_json::to_string(items)?),
            CompositeValue::Map(entries) => Ok(serde_json::to_string(entries)?),
        }
    }
}

/// Shape label for diagnostics.
pub fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
        _ => "scalar",
    }
}

/// Canonical JSON encoding of an arbitrary JSON value.
pub fn canonical_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Merge a new composite value with the current state of `key`.
///
/// The current value is decoded from `current_raw` if the key is stored, or
/// asked of the defaults provider otherwise. With no current value the new
/// value wins outright. Lists concatenate (current items first, no
/// deduplication), mappings shallow-merge (new keys win, absent keys are
/// preserved).
pub fn merge_value(
    current_raw: Option<&str>,
    defaults: &dyn DefaultsProvider,
    key: &str,
    new: CompositeValue,
) -> Result<CompositeValue> {
    let current = match current_raw {
        Some(raw) => Some(decode_stored(key, raw)?),
        None => defaults.default_for(key)?,
    };

    let Some(current) = current else {
        return Ok(new);
    };

    match (current, new) {
        (CompositeValue::List(mut items), CompositeValue::List(new_items)) => {
            items.extend(new_items);
            Ok(CompositeValue::List(items))
        }
        (CompositeValue::Map(mut entries), CompositeValue::Map(new_entries)) => {
            for (k, v) in new_entries {
                entries.insert(k, v);
            }
            Ok(CompositeValue::Map(entries))
        }
        (current, new) => Err(ConfigError::TypeMismatch {
            key: key.to_string(),
            expected: current.shape(),
            found: new.shape(),
        }),
    }
}

/// Decode a stored raw string that must hold a composite.
fn decode_stored(key: &str, raw: &str) -> Result<CompositeValue> {
    let value: Value = serde_json::from_str(raw).map_err(|e| ConfigError::InvalidStoredValue {
        key: key.to_string(),
        detail: e.to_string(),
    })?;
    let shape = shape_of(&value);
    CompositeValue::from_value(value).ok_or_else(|| ConfigError::InvalidStoredValue {
        key: key.to_string(),
        detail: format!("expected a list or mapping, found a {shape}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::{NoDefaults, StaticDefaults};
    use serde_json::json;

    fn composite(value: Value) -> CompositeValue {
        CompositeValue::from_value(value).expect("composite")
    }

    #[test]
    fn test_absent_key_returns_new_value() {
        let merged = merge_value(None, &NoDefaults, "a.key", composite(json!(["x"]))).expect("merge");
        assert_eq!(merged, composite(json!(["x"])));
    }

    #[test]
    fn test_lists_concatenate_in_order() {
        let merged =
            merge_value(Some(r#"["a","b"]"#), &NoDefaults, "k", composite(json!(["b", "c"])))
                .expect("merge");
        assert_eq!(merged.to_canonical_json().expect("json"), r#"["a","b","b","c"]"#);
    }

    #[test]
    fn test_mappings_overlay_new_keys_win() {
        let merged =
            merge_value(Some(r#"{"x":1,"y":3}"#), &NoDefaults, "k", composite(json!({"x": 2})))
                .expect("merge");
        assert_eq!(merged.to_canonical_json().expect("json"), r#"{"x":2,"y":3}"#);
    }

    #[test]
    fn test_list_into_mapping_is_type_mismatch() {
        let err = merge_value(Some(r#"{"x":1}"#), &NoDefaults, "k", composite(json!(["a"])))
            .expect_err("mismatch");
        match err {
            ConfigError::TypeMismatch { key, expected, found } => {
                assert_eq!(key, "k");
                assert_eq!(expected, "mapping");
                assert_eq!(found, "list");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_stored_scalar_is_invalid() {
        let err =
            merge_value(Some("25"), &NoDefaults, "k", composite(json!(["a"]))).expect_err("invalid");
        assert!(matches!(err, ConfigError::InvalidStoredValue { .. }));
    }

    #[test]
    fn test_stored_garbage_is_invalid() {
        let err = merge_value(Some("ssl,tcp,ws"), &NoDefaults, "k", composite(json!(["a"])))
            .expect_err("invalid");
        assert!(matches!(err, ConfigError::InvalidStoredValue { .. }));
    }

    #[test]
    fn test_default_used_when_key_absent() {
        let defaults = StaticDefaults::new(
            "app.web.",
            [("app.web.server_list".to_string(), json!([["localhost", 4064]]))]
                .into_iter()
                .collect(),
        );
        let merged = merge_value(
            None,
            &defaults,
            "app.web.server_list",
            composite(json!([["remote", 4064]])),
        )
        .expect("merge");
        assert_eq!(merged.to_canonical_json().expect("json"), r#"[["localhost",4064],["remote",4064]]"#);
    }

    #[test]
    fn test_key_outside_default_namespace_skips_lookup() {
        let defaults = StaticDefaults::new(
            "app.web.",
            [("app.web.k".to_string(), json!(["base"]))].into_iter().collect(),
        );
        let merged = merge_value(None, &defaults, "app.data.k", composite(json!(["x"]))).expect("merge");
        assert_eq!(merged.to_canonical_json().expect("json"), r#"["x"]"#);
    }

    #[test]
    fn test_non_composite_default_is_an_error() {
        let defaults = StaticDefaults::new(
            "app.",
            [("app.k".to_string(), json!("scalar"))].into_iter().collect(),
        );
        let err = merge_value(None, &defaults, "app.k", composite(json!(["x"]))).expect_err("default");
        assert!(matches!(err, ConfigError::DefaultResolution { .. }));
    }

    #[test]
    fn test_canonical_json_sorts_keys_and_keeps_unicode() {
        let value = composite(json!({"zeta": 1, "alpha": "café"}));
        assert_eq!(value.to_canonical_json().expect("json"), r#"{"alpha":"café","zeta":1}"#);
    }
}
