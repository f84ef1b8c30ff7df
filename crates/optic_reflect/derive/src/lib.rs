//! Derive support for `optic_reflect`. See [`Reflect`].
#![cfg_attr(docsrs, feature(doc_cfg))]

use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Full Reflection Derivation
///
/// `#[derive(Reflect)]` automatically implements the following traits:
///
/// - `TypePath`
/// - `Typed`
/// - `Struct`
/// - `Reflect`
///
/// Only structs with named fields are supported. Tuple structs, unit
/// structs, enums and unions are rejected with a compile error; every
/// property type must itself implement `Reflect` and `Typed`.
///
/// ## Property Attributes
///
/// Each field becomes a named property. Attributes adjust how:
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct Probe {
///     pub id: u64,
///     #[reflect(read_only)]
///     pub serial: String,
///     #[reflect(write_only)]
///     pub command: u32,
///     #[reflect(rename = "nickname")]
///     pub label: String,
///     #[reflect(skip)]
///     scratch: Vec<u8>,
/// }
/// ```
///
/// - `read_only` / `write_only`: restrict the property to one direction.
///   Lookups for the missing direction return `None`.
/// - `rename = "..."`: expose the property under another name.
/// - `skip`: leave the field out of the reflection surface entirely.
/// - `flatten`: splice the properties of an embedded struct into the
///   containing type, behind its own properties. Name lookup prefers the
///   own properties, so an own name shadows a flattened one; shadowed
///   descriptors stay reachable by index.
///
/// The declared visibility of each field (`pub` or anything less) is
/// recorded in its descriptor. Non-`pub` properties exist but are
/// filtered out by the default accessor policy.
///
/// ## Optimization with Standard Traits
///
/// If a type implements standard traits, the reflection implementations
/// can be simplified. The macro cannot detect this automatically, so it
/// does not assume their availability by default. Use attributes to
/// declare available traits so the macro can optimize accordingly:
///
/// ```rust, ignore
/// #[derive(Reflect, Clone, PartialEq)]
/// #[reflect(clone, partial_eq)]
/// struct Foo { /* ... */ }
/// ```
///
/// Available flags:
///
/// - `clone`: Standard `Clone`; `reflect_clone` stops failing.
/// - `partial_eq`: Standard `PartialEq`, used instead of the
///   property-by-property comparison.
/// - `debug`: Standard `Debug`, used instead of the generic
///   property formatter.
///
/// These attributes can only be applied at the type level.
///
/// ## Custom Type Path
///
/// By default the stable path is `module_path!()` plus the type name. An
/// attribute overrides it:
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(type_path = "you::me::Foo")]
/// struct Foo { /* ... */ }
/// ```
///
/// The path must end with the type's own name and does not need to
/// include generics (they will be automatically appended).
///
/// ## Auto Registration
///
/// Static registration is opt-in per type, even when the `auto_register`
/// feature is enabled:
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(auto_register)]
/// struct A { /* ... */ }
/// ```
///
/// Note: This attribute has no effect on generic types, as we cannot
/// determine which concrete types will be instantiated. It is also a
/// no-op when the `auto_register` feature is disabled.
///
/// This attribute can only be applied at the type level.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let reflect_impls = match reflect_impls(&ast) {
        Ok(tokens) => tokens,
        Err(err) => return err.into_compile_error().into(),
    };

    TokenStream::from(quote! {
        const _: () = {
            #reflect_impls
        };
    })
}

fn reflect_impls(ast: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    use crate::derive_data::{ReflectMeta, ReflectStruct, TypeAttributes};

    let fields = match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields,
            Fields::Unnamed(_) => {
                return Err(syn::Error::new(
                    data.fields.span(),
                    "`Reflect` supports only structs with named fields; \
                     tuple structs have no property names",
                ));
            }
            Fields::Unit => {
                return Err(syn::Error::new(
                    ast.ident.span(),
                    "`Reflect` supports only structs with named fields; \
                     a unit struct has no properties",
                ));
            }
        },
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span,
                "`Reflect` supports only structs with named fields",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "`Reflect` supports only structs with named fields",
            ));
        }
    };

    let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;
    let meta = ReflectMeta::new(attrs, &ast.ident, &ast.generics)?;
    let info = ReflectStruct::new(meta, fields)?;

    Ok(impls::impl_struct(&info))
}
