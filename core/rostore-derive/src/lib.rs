//! rostore Derive — procedural macros for rostore.
//!
//! Provides `#[derive(FieldMap)]` for record ↔ field-map conversion.

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input};

/// Derive macro for the `FieldMap` codec.
///
/// # Example
///
/// ```ignore
/// #[derive(Default, FieldMap)]
/// pub struct Post {
///     pub id: u64,
///     #[rostore(rename = "userId")]
///     pub user_id: u64,
///     pub title: Option<String>,
///     #[rostore(skip)]
///     pub cached: Vec<u8>,
/// }
/// ```
///
/// Every non-skipped field type must implement `FieldValue`.
/// `None` options are omitted from the encoded map; decoding only
/// overwrites fields present in the map.
#[proc_macro_derive(FieldMap, attributes(rostore))]
pub fn derive_field_map(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

struct FieldSpec<'a> {
    ident: &'a syn::Ident,
    ty: &'a syn::Type,
    name: String,
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "FieldMap can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "FieldMap can only be derived for structs",
            ));
        }
    };

    let mut specs = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let mut rename = None;
        let mut skip = false;
        for attr in &field.attrs {
            if !attr.path().is_ident("rostore") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    rename = Some(value.value());
                    Ok(())
                } else {
                    Err(meta.error("unsupported rostore attribute, expected `rename` or `skip`"))
                }
            })?;
        }
        if skip {
            continue;
        }
        let field_name = rename.unwrap_or_else(|| ident.to_string());
        if field_name.is_empty() {
            return Err(syn::Error::new_spanned(ident, "field name must not be empty"));
        }
        if specs.iter().any(|s: &FieldSpec<'_>| s.name == field_name) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("duplicate field name {field_name:?}"),
            ));
        }
        specs.push(FieldSpec {
            ident,
            ty: &field.ty,
            name: field_name,
        });
    }

    let encode = specs.iter().map(|spec| {
        let FieldSpec { ident, ty, name } = spec;
        quote! {
            if let ::std::option::Option::Some(value) =
                <#ty as ::rostore_core::codec::FieldValue>::encode(&self.#ident)
            {
                fields.push((::std::string::String::from(#name), value));
            }
        }
    });

    let decode = specs.iter().map(|spec| {
        let FieldSpec { ident, ty, name } = spec;
        quote! {
            if let ::std::option::Option::Some(raw) = fields.get(#name) {
                self.#ident = ::rostore_core::codec::decode_field::<#ty>(key, #name, raw)?;
            }
        }
    });

    let capacity = specs.len();

    Ok(quote! {
        impl #impl_generics ::rostore_core::codec::FieldMap for #name #ty_generics #where_clause {
            fn to_field_map(&self) -> ::rostore_core::codec::FieldValues {
                let mut fields = ::std::vec::Vec::with_capacity(#capacity);
                #(#encode)*
                fields
            }

            fn apply_field_map(
                &mut self,
                key: &str,
                fields: &::rostore_core::codec::RawFields,
            ) -> ::rostore_core::error::StoreResult<()> {
                let _ = (key, fields);
                #(#decode)*
                ::std::result::Result::Ok(())
            }
        }
    })
}
