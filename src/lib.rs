//! Populate a typed configuration struct from four layered sources: compiled
//! defaults, a JSON file, environment variables and command-line flags.
//!
//! ```ignore
//! #[derive(Configurable, Default)]
//! struct AppConfig {
//!     #[configurator(default = "localhost", file = "host", env = "HOST")]
//!     host: String,
//!     #[configurator(default = "8080", file = "port", env = "PORT")]
//!     port: i64,
//!     #[configurator(nested, file = "database")]
//!     database: DatabaseConfig,
//! }
//!
//! let mut config = AppConfig::default();
//! Configurator::default().initialize(&mut config);
//! ```
//!
//! That single call writes the declared defaults, overlays the JSON file named
//! by `CONFIGURATOR_CONFIG`, overlays `CONFIGURATOR_HOST` and
//! `CONFIGURATOR_PORT`, and finally parses `--host` and `--port` from the
//! process arguments.
//!
//! # Layer precedence
//!
//! ```text
//! Compiled defaults     #[configurator(default = "...")]
//!        ↑ overridden by
//! Config file           JSON at the path in {PREFIX}CONFIG
//!        ↑ overridden by
//! Environment vars      {PREFIX}{ENV}
//!        ↑ overridden by
//! Command-line flags    --{env-with-hyphens}
//! ```
//!
//! Every layer is sparse and works field by field. A field the file does not
//! mention, an unset variable, or a flag that was not passed leaves the value
//! from the layer below in place.
//!
//! # Field metadata
//!
//! Each field carries three optional strings:
//!
//! - **`default`** is a literal parsed by the field's kind. Empty means "keep
//!   the zero value".
//! - **`file`** is the JSON key. Empty means the field's name.
//! - **`env`** is the suffix appended to the prefix to form the environment
//!   variable. The same name, with the prefix stripped, underscores turned
//!   into hyphens and lowercased, is the flag. Empty means the field is not
//!   read from the environment and gets no flag.
//!
//! Nested records (`#[configurator(nested)]`) are walked recursively with the
//! same rules at every depth; their `file` key names a nested JSON object.
//!
//! # Supported kinds
//!
//! `bool`, `i64`, `String` and nested records. Every other type is
//! [`Slot::Unsupported`] and is skipped by every layer, so never rely on a
//! map, list or float field being populated.
//!
//! # Environment variables
//!
//! With the default prefix `CONFIGURATOR_`:
//!
//! | Env var | Flag | Field |
//! |---------|------|-------|
//! | `CONFIGURATOR_CONFIG` | | path of the JSON config file |
//! | `CONFIGURATOR_HOST` | `--host` | `env = "HOST"` |
//! | `CONFIGURATOR_DB_URL` | `--db-url` | `env = "DB_URL"` |
//!
//! Booleans accept `1`, `t`, `T`, `TRUE`, `true`, `True` and the matching
//! false forms. Integers are base 10.
//!
//! # Failure handling
//!
//! [`Configurator::initialize`] never fails. A missing or unreadable config
//! file, invalid JSON, a value of the wrong type or an unparseable flag each
//! skip that contribution (logged through `tracing`) and the fields keep the
//! values the earlier layers produced. The stage methods
//! ([`set_from_config_file`](Configurator::set_from_config_file),
//! [`parse_flags`](Configurator::parse_flags), ...) are public for callers
//! that want to see the errors.
//!
//! A config file is applied all or nothing: if any matched value has the
//! wrong type, no field is written.
//!
//! # Flags
//!
//! Flags live in the [`Configurator`]'s registry and are never registered
//! twice. Populating a second record that derives the same flag name leaves
//! the flag bound to the first field. Positional arguments after the flags
//! are kept in [`Configurator::args`].
//!
//! Integer flags take negative numbers (`--offset -5`) and string flags take
//! values starting with a hyphen. A malformed value or an unknown flag is
//! skipped on its own; the other flags still apply. A field whose flag is
//! named `help` takes over `--help`.

extern crate self as configurator;

pub mod error;
pub mod types;

mod builder;
mod cli;
mod defaults;
mod descriptor;
mod env;
mod file;
mod flags;
mod naming;
mod ops;

#[cfg(test)]
mod fixtures;

pub use builder::{CONFIG_LOCATION_SUFFIX, Configurator, ConfiguratorBuilder, DEFAULT_ENV_PREFIX};
pub use cli::{ConfigArgs, ConfigSubcommand};
pub use descriptor::{Configurable, Field, FieldDescriptor, Slot};
pub use env::{Environment, ProcessEnv};
pub use error::ConfiguratorError;
pub use flags::{Binding, Flag, FlagKind, FlagRegistry, ParsedFlags};
pub use naming::{env_key, form_flag_name, parse_bool, parse_int};
pub use ops::{ConfigResult, Entry};
pub use types::{ConfigAction, FieldKind};

#[cfg(feature = "derive")]
pub use configurator_derive::Configurable;
