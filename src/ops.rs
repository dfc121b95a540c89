//! Config operations: listing populated values and generating a config file
//! template, plus the `ConfigResult` enum callers use to display results.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::descriptor::{Configurable, Slot};
use crate::error::ConfiguratorError;
use crate::naming::{env_key, form_flag_name, join_path, parse_bool, parse_int};

/// Result of a config operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// A generated JSON template string.
    Template(String),
    /// Confirmation that a template was written to a file.
    TemplateWritten { path: PathBuf },
    /// Every populated field of the record.
    Listing { entries: Vec<Entry> },
}

/// One populated field as shown by `config list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Dotted path of file keys, e.g. `test.test-foo`.
    pub key: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::Template(t) => write!(f, "{t}"),
            ConfigResult::TemplateWritten { path } => {
                write!(f, "Config template written to {}", path.display())
            }
            ConfigResult::Listing { entries } => {
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{} = {}", entry.key, entry.value)?;
                    if let Some(env) = &entry.env {
                        write!(f, "  [{env}")?;
                        if let Some(flag) = &entry.flag {
                            write!(f, ", {flag}")?;
                        }
                        write!(f, "]")?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// List every supported leaf field with its current value and the
/// environment variable and flag that feed it.
pub fn list_values(record: &mut dyn Configurable, prefix: &str) -> ConfigResult {
    let mut entries = Vec::new();
    collect_entries(record, prefix, "", &mut entries);
    ConfigResult::Listing { entries }
}

fn collect_entries(
    record: &mut dyn Configurable,
    prefix: &str,
    parent: &str,
    entries: &mut Vec<Entry>,
) {
    for field in record.fields() {
        let key = join_path(parent, field.descriptor.json_key());
        let value = match field.slot {
            Slot::Nested(nested) => {
                collect_entries(nested, prefix, &key, entries);
                continue;
            }
            slot => match slot.display() {
                Some(value) => value,
                None => continue,
            },
        };
        let env = env_key(prefix, field.descriptor.env);
        let flag = env
            .as_deref()
            .map(|var| format!("--{}", form_flag_name(prefix, var)));
        entries.push(Entry {
            key,
            value,
            env,
            flag,
        });
    }
}

/// Render the record's declared defaults as a pretty-printed JSON config
/// file. Fields without a default, or whose default does not parse, are left
/// out.
pub fn generate_template(record: &mut dyn Configurable) -> Result<String, ConfiguratorError> {
    let template = Value::Object(defaults_object(record));
    let mut out = serde_json::to_string_pretty(&template).map_err(ConfiguratorError::Encode)?;
    out.push('\n');
    Ok(out)
}

fn defaults_object(record: &mut dyn Configurable) -> Map<String, Value> {
    let mut object = Map::new();
    for field in record.fields() {
        let literal = field.descriptor.default;
        let value = match field.slot {
            Slot::Nested(nested) => {
                let inner = defaults_object(nested);
                (!inner.is_empty()).then_some(Value::Object(inner))
            }
            _ if literal.is_empty() => None,
            Slot::Bool(_) => parse_bool(literal).map(Value::Bool),
            Slot::Int(_) => parse_int(literal).map(Value::from),
            Slot::Str(_) => Some(Value::String(literal.to_string())),
            Slot::Unsupported => None,
        };
        if let Some(value) = value {
            object.insert(field.descriptor.json_key().to_string(), value);
        }
    }
    object
}
