use crate::descriptor::{Configurable, Slot};
use crate::naming::{parse_bool, parse_int};

/// Write every field's declared default into the record.
///
/// Nested records are always descended into. Leaf fields with an empty
/// default keep their current value, as do fields whose default literal does
/// not parse as the field's kind (a warning is logged).
pub fn apply_defaults(record: &mut dyn Configurable) {
    for field in record.fields() {
        let descriptor = field.descriptor;
        let literal = descriptor.default;

        match field.slot {
            Slot::Nested(nested) => apply_defaults(nested),
            _ if literal.is_empty() => {}
            Slot::Bool(v) => match parse_bool(literal) {
                Some(parsed) => *v = parsed,
                None => tracing::warn!(
                    field = descriptor.name,
                    default = literal,
                    "default is not a valid boolean"
                ),
            },
            Slot::Int(v) => match parse_int(literal) {
                Some(parsed) => *v = parsed,
                None => tracing::warn!(
                    field = descriptor.name,
                    default = literal,
                    "default is not a valid integer"
                ),
            },
            Slot::Str(v) => *v = literal.to_string(),
            Slot::Unsupported => {
                tracing::trace!(field = descriptor.name, "skipping unsupported field");
            }
        }
    }
}
