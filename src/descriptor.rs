//! The record model every population stage walks.
//!
//! A configuration record exposes its fields through [`Configurable::fields`]:
//! one [`Field`] per struct field, pairing the declarative metadata
//! ([`FieldDescriptor`]) with a mutable borrow of the field's storage
//! ([`Slot`]). The derive macro writes this table for you; hand-written impls
//! destructure `self` so each slot borrows a disjoint field:
//!
//! ```
//! use configurator::{Configurable, Field, FieldDescriptor, Slot};
//!
//! #[derive(Default)]
//! struct Server {
//!     host: String,
//!     port: i64,
//! }
//!
//! impl Configurable for Server {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         let Self { host, port } = self;
//!         vec![
//!             Field::new(
//!                 FieldDescriptor::new("host").with_default("localhost").with_env("HOST"),
//!                 Slot::Str(host),
//!             ),
//!             Field::new(
//!                 FieldDescriptor::new("port").with_default("8080").with_env("PORT"),
//!                 Slot::Int(port),
//!             ),
//!         ]
//!     }
//! }
//! ```

use crate::types::FieldKind;

/// A configuration record whose fields can be populated.
pub trait Configurable {
    /// Return the field table, borrowing each field's storage.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// Declarative metadata attached to one field.
///
/// All three strings may be empty. An empty `default` leaves the field's zero
/// value alone, an empty `file_key` matches the JSON key named like the field,
/// and an empty `env` opts the field out of environment and flag handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub default: &'static str,
    pub file_key: &'static str,
    pub env: &'static str,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            default: "",
            file_key: "",
            env: "",
        }
    }

    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = default;
        self
    }

    pub const fn with_file_key(mut self, key: &'static str) -> Self {
        self.file_key = key;
        self
    }

    pub const fn with_env(mut self, env: &'static str) -> Self {
        self.env = env;
        self
    }

    /// The JSON object key this field is matched against.
    pub fn json_key(&self) -> &'static str {
        if self.file_key.is_empty() {
            self.name
        } else {
            self.file_key
        }
    }
}

/// Mutable access to a field's storage, tagged by kind.
pub enum Slot<'a> {
    Bool(&'a mut bool),
    Int(&'a mut i64),
    Str(&'a mut String),
    Nested(&'a mut dyn Configurable),
    /// Maps, sequences, floats and everything else. Never populated.
    Unsupported,
}

impl Slot<'_> {
    pub fn kind(&self) -> FieldKind {
        match self {
            Slot::Bool(_) => FieldKind::Bool,
            Slot::Int(_) => FieldKind::Int,
            Slot::Str(_) => FieldKind::Str,
            Slot::Nested(_) => FieldKind::Nested,
            Slot::Unsupported => FieldKind::Unsupported,
        }
    }

    /// Current value rendered as text, for leaf kinds only.
    pub fn display(&self) -> Option<String> {
        match self {
            Slot::Bool(v) => Some(v.to_string()),
            Slot::Int(v) => Some(v.to_string()),
            Slot::Str(v) => Some((**v).clone()),
            Slot::Nested(_) | Slot::Unsupported => None,
        }
    }
}

/// One entry of a record's field table.
pub struct Field<'a> {
    pub descriptor: FieldDescriptor,
    pub slot: Slot<'a>,
}

impl<'a> Field<'a> {
    pub fn new(descriptor: FieldDescriptor, slot: Slot<'a>) -> Self {
        Self { descriptor, slot }
    }

    pub fn kind(&self) -> FieldKind {
        self.slot.kind()
    }
}
