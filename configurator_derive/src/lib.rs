//! Derive macro for `configurator::Configurable`.
//!
//! Generates the field descriptor table from `#[configurator(...)]` field
//! attributes:
//!
//! ```ignore
//! #[derive(Configurable, Default)]
//! struct AppConfig {
//!     #[configurator(default = "8080", file = "port", env = "PORT")]
//!     port: i64,
//!     #[configurator(nested, file = "database")]
//!     database: DatabaseConfig,
//! }
//! ```
//!
//! A field's kind comes from its type: `bool`, `i64` and `String` map to the
//! matching slot, fields marked `nested` recurse, and anything else is
//! emitted as an unsupported slot so every stage skips it.

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

mod parse;

use parse::{FieldAttrs, SlotKind, parse_field_attrs, slot_kind};

/// Derive macro for `configurator::Configurable`.
#[proc_macro_derive(Configurable, attributes(configurator))]
pub fn derive_configurable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &input.ident;
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Configurable requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "Configurable can only be derived for structs",
            ));
        }
    };

    let mut bindings = Vec::new();
    let mut entries = Vec::new();

    for field in fields {
        let Some(name) = field.ident.as_ref() else {
            continue;
        };
        let attrs: FieldAttrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let kind = slot_kind(&field.ty, attrs.nested);
        if kind == SlotKind::Nested && !attrs.default.is_empty() {
            return Err(syn::Error::new_spanned(
                name,
                "nested fields cannot declare a default",
            ));
        }

        let field_name = name.to_string();
        let field_name = field_name.trim_start_matches("r#");
        let default = &attrs.default;
        let file = &attrs.file;
        let env = &attrs.env;

        let slot = match kind {
            SlotKind::Bool => quote! { ::configurator::Slot::Bool(#name) },
            SlotKind::Int => quote! { ::configurator::Slot::Int(#name) },
            SlotKind::Str => quote! { ::configurator::Slot::Str(#name) },
            SlotKind::Nested => quote! { ::configurator::Slot::Nested(#name) },
            SlotKind::Unsupported => quote! { ::configurator::Slot::Unsupported },
        };
        if kind != SlotKind::Unsupported {
            bindings.push(name);
        }

        entries.push(quote! {
            ::configurator::Field::new(
                ::configurator::FieldDescriptor::new(#field_name)
                    .with_default(#default)
                    .with_file_key(#file)
                    .with_env(#env),
                #slot,
            )
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::configurator::Configurable for #ident #ty_generics #where_clause {
            fn fields(&mut self) -> ::std::vec::Vec<::configurator::Field<'_>> {
                let Self { #( #bindings, )* .. } = self;
                ::std::vec![ #( #entries ),* ]
            }
        }
    })
}
