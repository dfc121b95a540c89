//! Attribute parsing and kind detection for the `Configurable` derive.

use syn::{Attribute, Lit, Type};

/// Values collected from `#[configurator(...)]` on one field.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct FieldAttrs {
    pub default: String,
    pub file: String,
    pub env: String,
    pub nested: bool,
    pub skip: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotKind {
    Bool,
    Int,
    Str,
    Nested,
    Unsupported,
}

/// Parse every `#[configurator(...)]` attribute on a field.
///
/// Recognised keys: `default`, `file` (alias `json`), `env`, `nested` and
/// `skip`. Unknown keys are an error so typos surface at compile time.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("configurator")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("nested") {
                out.nested = true;
            } else if meta.path.is_ident("skip") {
                out.skip = true;
            } else if meta.path.is_ident("default") {
                out.default = lit_string(&meta)?;
            } else if meta.path.is_ident("file") || meta.path.is_ident("json") {
                out.file = lit_string(&meta)?;
            } else if meta.path.is_ident("env") {
                out.env = lit_string(&meta)?;
            } else {
                return Err(meta.error("unknown configurator attribute"));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

/// Read `key = <literal>` as a string. Boolean and integer literals are
/// accepted for `default` so `default = 8080` reads naturally.
fn lit_string(meta: &syn::meta::ParseNestedMeta) -> syn::Result<String> {
    let lit: Lit = meta.value()?.parse()?;
    match lit {
        Lit::Str(s) => Ok(s.value()),
        Lit::Int(i) => Ok(i.base10_digits().to_string()),
        Lit::Bool(b) => Ok(b.value.to_string()),
        other => Err(syn::Error::new(
            other.span(),
            "expected a string, integer or boolean literal",
        )),
    }
}

/// Decide the slot kind from the field's declared type.
pub(crate) fn slot_kind(ty: &Type, nested: bool) -> SlotKind {
    if nested {
        return SlotKind::Nested;
    }
    let Type::Path(path) = ty else {
        return SlotKind::Unsupported;
    };
    if path.qself.is_some() {
        return SlotKind::Unsupported;
    }
    let Some(last) = path.path.segments.last() else {
        return SlotKind::Unsupported;
    };
    if !last.arguments.is_empty() {
        return SlotKind::Unsupported;
    }
    match last.ident.to_string().as_str() {
        "bool" => SlotKind::Bool,
        "i64" => SlotKind::Int,
        "String" => SlotKind::Str,
        _ => SlotKind::Unsupported,
    }
}
