//! `#[derive(Describe)]` for routedoc.
//!
//! The derive turns a struct with named fields into a static type descriptor. Field tags
//! are declared with `#[describe(key = "value", ...)]`; a bare key is shorthand for
//! `key = "true"`. `#[serde(rename = "..")]` and `#[serde(skip)]` fill in the `json` tag
//! when no explicit one is given.
//!
//! ```ignore
//! #[derive(Describe)]
//! pub struct FindUser {
//!     #[describe(query = "name", validate = "required,isAlpha", example = "ac")]
//!     pub name: String,
//!     #[describe(query = "age", validate = "required,isInt")]
//!     pub age: u32,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Fields, LitStr, Token, Visibility};

#[proc_macro_derive(Describe, attributes(describe))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;
    let type_name = ident.unraw().to_string();

    let fields: Vec<&syn::Field> = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "`Describe` requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "`Describe` can only be derived for structs",
            ))
        }
    };

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(::routedoc::Describe));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    // Generic instantiations are named after their type arguments.
    let type_args: Vec<_> = input.generics.type_params().map(|param| &param.ident).collect();
    let name = if type_args.is_empty() {
        quote!(#type_name)
    } else {
        quote! {
            ::routedoc::type_resolver::generic_name(
                #type_name,
                &[#(<#type_args as ::routedoc::Describe>::describe
                    as ::routedoc::type_resolver::DescribeFn),*],
            )
        }
    };

    let field_defs = fields
        .iter()
        .map(|field| field_def(field))
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        impl #impl_generics ::routedoc::Describe for #ident #ty_generics #where_clause {
            fn describe() -> ::routedoc::type_resolver::ResolvedType {
                ::routedoc::type_resolver::ResolvedType::structure(
                    #name,
                    ::std::vec![#(#field_defs),*],
                )
                .with_id(::std::any::type_name::<Self>())
            }
        }
    })
}

fn field_def(field: &syn::Field) -> syn::Result<TokenStream2> {
    let field_ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
    let field_name = field_ident.unraw().to_string();
    let exported = !matches!(field.vis, Visibility::Inherited);
    let ty = &field.ty;

    let tags = collect_tags(&field.attrs)?;
    let keys = tags.iter().map(|(key, _)| key);
    let values = tags.iter().map(|(_, value)| value);

    Ok(quote! {
        ::routedoc::type_resolver::FieldDef::new(
            #field_name,
            <#ty as ::routedoc::Describe>::describe,
        )
        .exported(#exported)
        .tags(::routedoc::type_resolver::FieldTags::new(&[#((#keys, #values)),*]))
    })
}

fn collect_tags(attrs: &[Attribute]) -> syn::Result<Vec<(String, String)>> {
    let mut tags: Vec<(String, String)> = Vec::new();
    let mut serde_rename = None;
    let mut serde_skip = false;

    for attr in attrs {
        if attr.path().is_ident("describe") {
            attr.parse_nested_meta(|meta| {
                let key = meta
                    .path
                    .get_ident()
                    .map(|ident| ident.unraw().to_string())
                    .ok_or_else(|| meta.error("expected a tag name"))?;
                let value = if meta.input.peek(Token![=]) {
                    meta.value()?.parse::<LitStr>()?.value()
                } else {
                    "true".to_string()
                };
                tags.push((key, value));
                Ok(())
            })?;
        } else if attr.path().is_ident("serde") {
            // Unrecognised serde options are consumed and dropped.
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") && meta.input.peek(Token![=]) {
                    serde_rename = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                    serde_skip = true;
                } else {
                    skip_meta_value(&meta)?;
                }
                Ok(())
            })?;
        }
    }

    if !tags.iter().any(|(key, _)| key == "json") {
        if serde_skip {
            tags.push(("json".to_string(), "-".to_string()));
        } else if let Some(name) = serde_rename {
            tags.push(("json".to_string(), name));
        }
    }

    Ok(tags)
}

fn skip_meta_value(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        content.parse::<TokenStream2>()?;
    }
    Ok(())
}
