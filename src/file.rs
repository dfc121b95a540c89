//! Config file loading and merging.
//!
//! The file path comes from a single environment variable (by default
//! `CONFIGURATOR_CONFIG`). Its contents must be a JSON object whose keys match
//! the fields' file keys; nested records match nested objects.
//!
//! # Matching
//!
//! A key matches a field when it equals the field's file key ignoring ASCII
//! case. When several keys match, the last one in the document wins. Unknown
//! keys are ignored, missing keys and `null` values leave the field alone.
//! Unsupported fields are never written even when a key matches.
//!
//! # Atomicity
//!
//! Merging runs in two passes over the record. The first only checks that
//! every matched value has the field's kind; the second writes. A type
//! mismatch anywhere therefore leaves the whole record untouched.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::descriptor::{Configurable, Slot};
use crate::env::Environment;
use crate::error::ConfiguratorError;
use crate::naming::join_path;

/// Read the config file named by the `location_var` environment variable.
pub fn load_config_file(
    env: &dyn Environment,
    location_var: &str,
) -> Result<(PathBuf, Vec<u8>), ConfiguratorError> {
    let path = env
        .var(location_var)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| ConfiguratorError::NoConfigPath {
            var: location_var.to_string(),
        })?;

    tracing::debug!(path = %path.display(), "reading config file");

    let contents = std::fs::read(&path).map_err(|e| ConfiguratorError::FileUnavailable {
        path: path.clone(),
        source: e,
    })?;
    Ok((path, contents))
}

/// Decode `contents` and overlay the matched values onto `record`.
///
/// Returns the number of fields written.
pub fn merge_json(
    path: &Path,
    contents: &[u8],
    record: &mut dyn Configurable,
) -> Result<usize, ConfiguratorError> {
    let value: Value = serde_json::from_slice(contents).map_err(|e| ConfiguratorError::Decode {
        path: path.to_path_buf(),
        source: e,
    })?;

    let object = match value {
        Value::Object(object) => object,
        Value::Null => Map::new(),
        _ => {
            return Err(ConfiguratorError::NotAnObject {
                path: path.to_path_buf(),
            });
        }
    };

    check_object(&object, record, "")?;
    Ok(write_object(&object, record))
}

/// The last non-null value whose key matches `key` ignoring ASCII case.
/// Keys keep document order, so a later spelling overrides an earlier one.
fn lookup<'m>(object: &'m Map<String, Value>, key: &str) -> Option<&'m Value> {
    object
        .iter()
        .rev()
        .find(|(k, v)| k.eq_ignore_ascii_case(key) && !v.is_null())
        .map(|(_, v)| v)
}

fn check_object(
    object: &Map<String, Value>,
    record: &mut dyn Configurable,
    parent: &str,
) -> Result<(), ConfiguratorError> {
    for field in record.fields() {
        let key = field.descriptor.json_key();
        let Some(value) = lookup(object, key) else {
            continue;
        };
        let path = join_path(parent, key);
        let kind = field.kind();

        let ok = match field.slot {
            Slot::Bool(_) => value.is_boolean(),
            Slot::Int(_) => value.as_i64().is_some(),
            Slot::Str(_) => value.is_string(),
            Slot::Nested(nested) => match value.as_object() {
                Some(inner) => {
                    check_object(inner, nested, &path)?;
                    true
                }
                None => false,
            },
            Slot::Unsupported => true,
        };

        if !ok {
            return Err(ConfiguratorError::TypeMismatch {
                key: path,
                expected: kind.as_str(),
            });
        }
    }
    Ok(())
}

fn write_object(object: &Map<String, Value>, record: &mut dyn Configurable) -> usize {
    let mut written = 0;
    for field in record.fields() {
        let Some(value) = lookup(object, field.descriptor.json_key()) else {
            continue;
        };

        match (field.slot, value) {
            (Slot::Bool(v), Value::Bool(b)) => {
                *v = *b;
                written += 1;
            }
            (Slot::Int(v), Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    *v = i;
                    written += 1;
                }
            }
            (Slot::Str(v), Value::String(s)) => {
                v.clone_from(s);
                written += 1;
            }
            (Slot::Nested(nested), Value::Object(inner)) => {
                written += write_object(inner, nested);
            }
            _ => {}
        }
    }
    written
}
