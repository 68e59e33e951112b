//! Derive macro for validatable entities.
//!
//! This crate provides the `#[derive(Entity)]` macro, which declares where an
//! entity keeps its errors and which of its fields hold nested entities.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Expr, Fields, Ident, Lit, Meta};

/// Derives `Entity` and `NestedEntities` for a struct.
///
/// # Attributes
///
/// - `#[entity(model_name = "Steps::Appeal::Penalty")]` - Sets the model name
///   (optional, defaults to the struct name)
///
/// # Field Attributes
///
/// - `#[entity(errors)]` - The field of type `Errors` holding validation
///   state. Without one the entity does not expose errors.
/// - `#[entity(nested)]` - The field holds nested entities (directly, or in an
///   `Option`, `Vec`, `Box`, `Rc`, `Arc`, `RefCell` or `Weak`). Fields are
///   visited in declaration order.
/// - `#[entity(nested, name = "address")]` - Uses another name in ids and
///   input names (defaults to the field name)
#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_entity_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_entity_impl(input: DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let model_name = get_model_name(&input.attrs, struct_name)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => {
                return Ok(expand(&input, &model_name, None, &[]));
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Entity derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Entity derive only supports structs",
            ));
        }
    };

    let mut errors_field: Option<Ident> = None;
    let mut nested: Vec<NestedInfo> = Vec::new();
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let attrs = parse_field_attrs(&field.attrs)?;

        if attrs.errors {
            if errors_field.is_some() {
                return Err(syn::Error::new_spanned(
                    field,
                    "only one field may be marked #[entity(errors)]",
                ));
            }
            errors_field = Some(field_name.clone());
        }
        if attrs.nested {
            nested.push(NestedInfo {
                field_name: field_name.clone(),
                name: attrs
                    .name
                    .unwrap_or_else(|| field_name.to_string().trim_start_matches("r#").to_string()),
            });
        } else if attrs.name.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "`name` is only allowed together with `nested`",
            ));
        }
    }

    Ok(expand(&input, &model_name, errors_field.as_ref(), &nested))
}

fn expand(
    input: &DeriveInput,
    model_name: &str,
    errors_field: Option<&Ident>,
    nested: &[NestedInfo],
) -> TokenStream2 {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let errors_impl = errors_field.map(|field| {
        quote! {
            fn errors(&self) -> ::core::option::Option<&::govuk_forms::Errors> {
                ::core::option::Option::Some(&self.#field)
            }
        }
    });

    let visits: Vec<TokenStream2> = nested
        .iter()
        .map(|info| {
            let field_name = &info.field_name;
            let name = &info.name;
            quote! {
                ::govuk_forms::NestedEntities::visit_as(
                    &self.#field_name,
                    #name,
                    ::core::option::Option::None,
                    visit,
                )?;
            }
        })
        .collect();

    quote! {
        impl #impl_generics ::govuk_forms::Entity for #struct_name #ty_generics #where_clause {
            fn model_name(&self) -> &str {
                #model_name
            }

            #errors_impl

            fn visit_nested(
                &self,
                visit: &mut ::govuk_forms::NestedVisitor<'_>,
            ) -> ::govuk_forms::Result<()> {
                let _ = &visit;
                #(#visits)*
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics ::govuk_forms::NestedEntities for #struct_name #ty_generics #where_clause {
            fn visit_as(
                &self,
                field: &str,
                index: ::core::option::Option<usize>,
                visit: &mut ::govuk_forms::NestedVisitor<'_>,
            ) -> ::govuk_forms::Result<()> {
                visit(::govuk_forms::Nested {
                    field,
                    index,
                    entity: self,
                })
            }
        }
    }
}

struct NestedInfo {
    field_name: Ident,
    name: String,
}

#[derive(Default)]
struct FieldAttrs {
    errors: bool,
    nested: bool,
    name: Option<String>,
}

fn parse_string(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<String> {
    let value: Expr = meta.value()?.parse()?;
    if let Expr::Lit(lit) = &value {
        if let Lit::Str(s) = &lit.lit {
            return Ok(s.value());
        }
    }
    Err(syn::Error::new_spanned(value, "expected a string literal"))
}

fn get_model_name(attrs: &[Attribute], struct_name: &Ident) -> syn::Result<String> {
    for attr in attrs {
        if attr.path().is_ident("entity") {
            let mut model_name = None;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("model_name") {
                    model_name = Some(parse_string(&meta)?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported entity attribute, expected `model_name`"))
                }
            })?;
            if let Some(name) = model_name {
                return Ok(name);
            }
        }
    }
    Ok(struct_name.to_string())
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut result = FieldAttrs::default();

    for attr in attrs {
        if attr.path().is_ident("entity") {
            if matches!(attr.meta, Meta::Path(_)) {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected #[entity(errors)] or #[entity(nested)]",
                ));
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("errors") {
                    result.errors = true;
                } else if meta.path.is_ident("nested") {
                    result.nested = true;
                } else if meta.path.is_ident("name") {
                    result.name = Some(parse_string(&meta)?);
                } else {
                    return Err(meta.error("unsupported entity field attribute"));
                }
                Ok(())
            })?;
        }
    }

    Ok(result)
}
