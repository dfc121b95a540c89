//! Environment-variable overlay and flag registration.
//!
//! For every leaf field with an env suffix, the binder reads
//! `{PREFIX}{SUFFIX}` (uppercased), writes the parsed value into the field when
//! the variable is non-empty, and then registers a command-line flag for the
//! field seeded with its current value. Values that fail to parse are logged
//! and dropped; the field keeps what the earlier stages wrote.
//!
//! The [`Environment`] trait lets tests pass synthetic data instead of
//! `std::env::vars()`.

use std::collections::HashMap;

use crate::descriptor::{Configurable, Slot};
use crate::flags::{Binding, Flag, FlagKind, FlagRegistry};
use crate::naming::{env_key, form_flag_name, join_path, parse_bool, parse_int};

/// Read access to environment variables by name.
pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Walks a record applying environment values and registering flags.
pub(crate) struct EnvBinder<'a> {
    pub prefix: &'a str,
    pub owner: &'a str,
    pub env: &'a dyn Environment,
    pub registry: &'a mut FlagRegistry,
}

impl EnvBinder<'_> {
    /// Returns the number of fields written from the environment.
    pub fn bind(&mut self, record: &mut dyn Configurable, parent: &str) -> usize {
        let mut written = 0;
        for field in record.fields() {
            let descriptor = field.descriptor;
            let path = join_path(parent, descriptor.name);

            let slot = match field.slot {
                Slot::Nested(nested) => {
                    written += self.bind(nested, &path);
                    continue;
                }
                Slot::Unsupported => {
                    tracing::trace!(field = %path, "skipping unsupported field");
                    continue;
                }
                slot => slot,
            };
            let Some(key) = env_key(self.prefix, descriptor.env) else {
                continue;
            };
            let flag_name = form_flag_name(self.prefix, &key);
            let value = self.env.var(&key).unwrap_or_default();

            let (kind, current) = match slot {
                Slot::Bool(v) => {
                    if !value.is_empty() {
                        match parse_bool(&value) {
                            Some(parsed) => {
                                *v = parsed;
                                written += 1;
                            }
                            None => warn_unparsed(&key, &value, "boolean"),
                        }
                    }
                    (FlagKind::Bool, v.to_string())
                }
                Slot::Int(v) => {
                    if !value.is_empty() {
                        match parse_int(&value) {
                            Some(parsed) => {
                                *v = parsed;
                                written += 1;
                            }
                            None => warn_unparsed(&key, &value, "integer"),
                        }
                    }
                    (FlagKind::Int, v.to_string())
                }
                Slot::Str(v) => {
                    if !value.is_empty() {
                        *v = value;
                        written += 1;
                    }
                    (FlagKind::Str, v.clone())
                }
                Slot::Nested(_) | Slot::Unsupported => continue,
            };

            let registered = self.registry.register(Flag {
                name: flag_name.clone(),
                kind,
                default: current,
                binding: Binding {
                    owner: self.owner.to_string(),
                    path: path.clone(),
                },
            });
            if registered {
                tracing::trace!(flag = %flag_name, field = %path, "registered flag");
            } else {
                tracing::trace!(flag = %flag_name, field = %path, "flag not registered");
            }
        }
        written
    }
}

fn warn_unparsed(key: &str, value: &str, expected: &str) {
    tracing::warn!(var = key, value, expected, "ignoring unparseable environment value");
}
