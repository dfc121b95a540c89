use std::path::PathBuf;

/// The kind of a record field, as seen by every population stage.
///
/// Anything outside the first four variants is [`Unsupported`](FieldKind::Unsupported)
/// and is skipped by defaults, file, environment and flag handling alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Int,
    Str,
    Nested,
    Unsupported,
}

impl FieldKind {
    /// Name used in error messages and listings.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Bool => "boolean",
            FieldKind::Int => "integer",
            FieldKind::Str => "string",
            FieldKind::Nested => "object",
            FieldKind::Unsupported => "unsupported",
        }
    }
}

/// A config operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    /// Show every populated field with its env var, flag and current value.
    List,
    /// Produce a JSON config file holding the declared defaults.
    Template { output: Option<PathBuf> },
}
