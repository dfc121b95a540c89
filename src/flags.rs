//! Command-line flag registry and the final, flag-parse overlay.
//!
//! Flags are registered by the environment stage, one per leaf field with an
//! env suffix. The registry keeps the first registration of every name; a
//! later field deriving the same name is not bound to that flag.
//!
//! Parsing builds a clap [`Command`] from the registry at parse time, so the
//! same registry can serve several records and several population passes.
//! Only values the user actually typed are applied: a flag that was not
//! passed leaves its field at whatever the earlier stages produced.
//!
//! Flag values are captured as text and converted when they are applied, so a
//! malformed value only costs its own field. An argument clap rejects outright
//! (an unknown flag, a flag missing its value) is dropped and the remaining
//! arguments are parsed again.

use std::collections::BTreeMap;
use std::ffi::OsString;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};

use crate::descriptor::{Configurable, Slot};
use crate::naming::{env_key, form_flag_name, join_path, parse_bool, parse_int};

/// Id of the catch-all positional argument.
const REMAINING_ARGS: &str = "__configurator_args";

/// Id and long name of the usage flag, unless a field claims it.
const HELP: &str = "help";

/// The value type a flag accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Bool,
    Int,
    Str,
}

/// The field a flag writes to: the record type and the dotted field path
/// within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub owner: String,
    pub path: String,
}

/// A registered flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub name: String,
    pub kind: FlagKind,
    /// The bound field's value at registration time, shown in `--help`.
    pub default: String,
    pub binding: Binding,
}

/// Additive set of flags keyed by name.
#[derive(Debug, Default)]
pub struct FlagRegistry {
    flags: BTreeMap<String, Flag>,
}

impl FlagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, name: &str) -> Option<&Flag> {
        self.flags.get(name)
    }

    /// Register `flag` unless its name is taken or cannot be spelled as a
    /// long option. Returns whether it was added.
    pub fn register(&mut self, flag: Flag) -> bool {
        if !is_valid_flag_name(&flag.name) {
            tracing::warn!(flag = %flag.name, field = %flag.binding.path, "not a usable flag name");
            return false;
        }
        if self.flags.contains_key(&flag.name) {
            return false;
        }
        self.flags.insert(flag.name.clone(), flag);
        true
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }

    /// Build a clap command accepting every registered flag plus any number
    /// of trailing positional arguments.
    ///
    /// `-h`/`--help` print usage unless a field owns the `help` flag, in
    /// which case `--help` is that field's flag.
    pub fn command(&self, bin_name: &str) -> Command {
        let mut cmd = Command::new(bin_name.to_string())
            .args_override_self(true)
            .disable_help_flag(true)
            .arg(
                Arg::new(REMAINING_ARGS)
                    .value_name("ARGS")
                    .num_args(0..)
                    .trailing_var_arg(true)
                    .action(ArgAction::Append),
            );

        if !self.flags.contains_key(HELP) {
            cmd = cmd.arg(
                Arg::new(HELP)
                    .short('h')
                    .long(HELP)
                    .action(ArgAction::Help)
                    .help("Print help"),
            );
        }

        for flag in self.flags.values() {
            let mut arg = Arg::new(flag.name.clone())
                .long(flag.name.clone())
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(String));
            if !flag.default.is_empty() {
                arg = arg.default_value(flag.default.clone());
            }
            arg = match flag.kind {
                FlagKind::Bool => arg
                    .num_args(0..=1)
                    .require_equals(true)
                    .default_missing_value("true"),
                FlagKind::Int => arg.allow_negative_numbers(true),
                FlagKind::Str => arg.allow_hyphen_values(true),
            };
            cmd = cmd.arg(arg);
        }
        cmd
    }

    /// Parse `args` (including the binary name) against the registry.
    ///
    /// Arguments clap rejects are logged and dropped one at a time until the
    /// rest parses. Only `--help` and errors that cannot be pinned on a single
    /// argument are returned.
    pub fn parse<I, T>(&self, bin_name: &str, args: I) -> Result<ParsedFlags, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        loop {
            let err = match self.command(bin_name).try_get_matches_from(args.iter()) {
                Ok(matches) => {
                    let remaining = matches
                        .get_many::<String>(REMAINING_ARGS)
                        .map(|values| values.cloned().collect())
                        .unwrap_or_default();
                    return Ok(ParsedFlags { matches, remaining });
                }
                Err(err) => err,
            };

            let Some(index) = rejected_arg(&err, &args) else {
                return Err(err);
            };
            tracing::warn!(
                arg = %args[index].to_string_lossy(),
                kind = %err.kind(),
                "dropping rejected command-line argument"
            );
            args.remove(index);
        }
    }
}

fn is_valid_flag_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.contains('=')
        && !name.chars().any(char::is_whitespace)
}

/// Position of the argument `err` complains about, if it is one clap can
/// recover from by leaving it out.
fn rejected_arg(err: &clap::Error, args: &[OsString]) -> Option<usize> {
    let recoverable = matches!(
        err.kind(),
        ErrorKind::UnknownArgument
            | ErrorKind::InvalidValue
            | ErrorKind::NoEquals
            | ErrorKind::ValueValidation
            | ErrorKind::TooManyValues
            | ErrorKind::WrongNumberOfValues
    );
    if !recoverable {
        return None;
    }
    let ContextValue::String(invalid) = err.get(ContextKind::InvalidArg)? else {
        return None;
    };
    // Rendered as `--name <name>` for value errors.
    let token = invalid.split_whitespace().next()?;
    let with_value = format!("{token}=");
    args.iter()
        .enumerate()
        .skip(1)
        .take_while(|(_, arg)| arg.to_str() != Some("--"))
        .find(|(_, arg)| {
            arg.to_str()
                .is_some_and(|arg| arg == token || arg.starts_with(&with_value))
        })
        .map(|(index, _)| index)
}

/// The outcome of one command-line parse.
#[derive(Debug)]
pub struct ParsedFlags {
    matches: ArgMatches,
    remaining: Vec<String>,
}

impl ParsedFlags {
    /// Positional arguments left after the flags.
    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    /// The raw text given for flag `name` on the command line. `None` when
    /// the flag was not passed.
    pub fn value(&self, name: &str) -> Option<&str> {
        if !matches!(self.matches.value_source(name), Some(ValueSource::CommandLine)) {
            return None;
        }
        self.matches
            .try_get_one::<String>(name)
            .ok()
            .flatten()
            .map(String::as_str)
    }
}

/// Context for writing parsed flag values back into a record.
pub(crate) struct FlagApplier<'a> {
    pub prefix: &'a str,
    pub owner: &'a str,
    pub registry: &'a FlagRegistry,
    pub parsed: &'a ParsedFlags,
}

impl FlagApplier<'_> {
    /// Write every flag given on the command line into the field it is bound
    /// to. A value that does not parse as the field's kind is logged and the
    /// field keeps its current value. Returns the number of fields written.
    pub fn apply(&self, record: &mut dyn Configurable, parent: &str) -> usize {
        let mut written = 0;
        for field in record.fields() {
            let path = join_path(parent, field.descriptor.name);
            let kind = field.kind();

            let slot = match field.slot {
                Slot::Nested(nested) => {
                    written += self.apply(nested, &path);
                    continue;
                }
                Slot::Unsupported => continue,
                slot => slot,
            };
            let Some(key) = env_key(self.prefix, field.descriptor.env) else {
                continue;
            };
            let name = form_flag_name(self.prefix, &key);
            let bound = self.registry.lookup(&name).is_some_and(|flag| {
                flag.binding.owner == self.owner && flag.binding.path == path
            });
            if !bound {
                continue;
            }
            let Some(raw) = self.parsed.value(&name) else {
                continue;
            };

            let applied = match slot {
                Slot::Bool(v) => parse_bool(raw).map(|b| *v = b),
                Slot::Int(v) => parse_int(raw).map(|i| *v = i),
                Slot::Str(v) => {
                    *v = raw.to_string();
                    Some(())
                }
                Slot::Nested(_) | Slot::Unsupported => None,
            };
            if applied.is_some() {
                tracing::trace!(flag = %name, field = %path, "applied command-line flag");
                written += 1;
            } else {
                tracing::warn!(
                    flag = %name,
                    value = raw,
                    expected = kind.as_str(),
                    "ignoring unparseable flag value"
                );
            }
        }
        written
    }
}
