use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::punctuated::Punctuated;
use syn::{Generics, Ident, ImplGenerics, LitStr, Path, Token, Type, TypeGenerics};

use super::TypeAttributes;
use crate::utils::StringExpr;

// -----------------------------------------------------------------------------
// CustomPath

/// A `type_path = "..."` override, pre-split into its two halves.
struct CustomPath {
    /// The full path as written, the type name included.
    full: LitStr,
    /// Everything before the final segment.
    module: LitStr,
}

impl CustomPath {
    fn parse(lit: &LitStr, ident: &Ident) -> syn::Result<Self> {
        let value = lit.value();

        if value.starts_with("::") {
            return Err(syn::Error::new(
                lit.span(),
                "`type_path` must not start with `::`",
            ));
        }

        let Some((module, last)) = value.rsplit_once("::") else {
            return Err(syn::Error::new(
                lit.span(),
                "`type_path` must be a full path with at least one module \
                 segment, such as `\"my_crate::Foo\"`",
            ));
        };

        if ident.to_string() != last {
            return Err(syn::Error::new(
                lit.span(),
                "`type_path` must end with the type's own name",
            ));
        }

        Ok(Self {
            full: lit.clone(),
            module: LitStr::new(module, lit.span()),
        })
    }
}

// -----------------------------------------------------------------------------
// ReflectMeta

/// Everything about the derived type that the trait generators share:
/// attributes, identity, generics and the string expressions for its
/// stable paths.
pub(crate) struct ReflectMeta<'a> {
    optic_reflect_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
    custom_path: Option<CustomPath>,
    /// Property types, used for `where` bounds.
    ///
    /// Declaration order keeps the emitted clause stable.
    active_types: Vec<&'a Type>,
    /// Flattened property types; when these mention a type parameter they
    /// additionally need the `Struct` bound.
    flatten_types: Vec<&'a Type>,
}

impl<'a> ReflectMeta<'a> {
    pub fn new(
        attrs: TypeAttributes,
        ident: &'a Ident,
        generics: &'a Generics,
    ) -> syn::Result<Self> {
        let custom_path = match &attrs.type_path {
            Some(lit) => Some(CustomPath::parse(lit, ident)?),
            None => None,
        };

        Ok(Self {
            optic_reflect_path: crate::path::optic_reflect(),
            attrs,
            ident,
            generics,
            custom_path,
            active_types: Vec::new(),
            flatten_types: Vec::new(),
        })
    }

    /// Used by [`ReflectStruct`](super::ReflectStruct), which knows the
    /// field types, to hand them over for `where` clause generation.
    #[inline]
    pub(super) fn set_active_types(
        &mut self,
        active_types: Vec<&'a Type>,
        flatten_types: Vec<&'a Type>,
    ) {
        self.active_types = active_types;
        self.flatten_types = flatten_types;
    }

    #[inline]
    pub fn optic_reflect_path(&self) -> &Path {
        &self.optic_reflect_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    /// Whether the implementations go through the generic cells.
    ///
    /// Lifetime-only generics do not count: their paths are static and a
    /// single cell slot per type suffices.
    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        self.generics.type_params().next().is_some()
    }

    #[inline]
    pub fn real_ident(&self) -> &Ident {
        self.ident
    }

    // -------------------------------------------------------------------------
    // Path expressions

    /// The path pieces up to and including the type name.
    fn base_path_parts(&self) -> Vec<StringExpr> {
        match &self.custom_path {
            Some(custom) => vec![StringExpr::from_lit(&custom.full)],
            None => vec![
                StringExpr::Const(quote!(::core::module_path!())),
                StringExpr::from_str("::"),
                StringExpr::from(self.ident),
            ],
        }
    }

    /// The `<A, B>` pieces, rendered through each parameter's `TypePath`.
    fn generic_arg_parts(&self, full_path: bool) -> Vec<StringExpr> {
        let type_path_ = crate::path::type_path_(&self.optic_reflect_path);

        let mut parts = vec![StringExpr::from_str("<")];
        for (i, param) in self.generics.type_params().enumerate() {
            if i != 0 {
                parts.push(StringExpr::from_str(", "));
            }

            let ident = &param.ident;
            parts.push(StringExpr::Borrowed(if full_path {
                quote!(<#ident as #type_path_>::type_path())
            } else {
                quote!(<#ident as #type_path_>::type_name())
            }));
        }
        parts.push(StringExpr::from_str(">"));

        parts
    }

    pub fn type_path(&self) -> StringExpr {
        let mut parts = self.base_path_parts();
        if self.impl_with_generic() {
            parts.extend(self.generic_arg_parts(true));
        }
        StringExpr::from_iter(parts, &self.optic_reflect_path)
    }

    pub fn type_name(&self) -> StringExpr {
        let mut parts = vec![StringExpr::from(self.ident)];
        if self.impl_with_generic() {
            parts.extend(self.generic_arg_parts(false));
        }
        StringExpr::from_iter(parts, &self.optic_reflect_path)
    }

    pub fn type_ident(&self) -> StringExpr {
        StringExpr::from(self.ident)
    }

    pub fn module_path(&self) -> StringExpr {
        match &self.custom_path {
            Some(custom) => StringExpr::from_lit(&custom.module),
            None => StringExpr::Const(quote!(::core::module_path!())),
        }
    }

    // -------------------------------------------------------------------------
    // Generics

    /// Return the required generic parameters.
    ///
    /// The three parameters returned are `impl_generics`, `ty_generics`,
    /// `where_clause`.
    ///
    /// The `where` clause collects, in order:
    ///
    /// - `Self: Any + Send + Sync` when type parameters exist, or
    ///   `Self: 'static` when only lifetimes do;
    /// - the type's own `where` predicates;
    /// - `TypePath` for every type parameter, since both the path and the
    ///   info constructions render parameters through it;
    /// - with `add_reflect_typed`, `Reflect + Typed` for every property
    ///   type that mentions a parameter (`PropertyInfo::new` needs both),
    ///   plus `Struct` for flattened ones.
    pub fn split_generics(
        &self,
        add_reflect_typed: bool,
    ) -> (ImplGenerics<'_>, TypeGenerics<'_>, TokenStream) {
        use crate::path::fp::{AnyFP, SendFP, SyncFP};

        let generics = self.generics;

        let mut generic_where_clause = quote! { where };

        if generics.type_params().next().is_some() {
            generic_where_clause.extend(quote! { Self: #AnyFP + #SendFP + #SyncFP, });
        } else if generics.lifetimes().next().is_some() {
            generic_where_clause.extend(quote! { Self: 'static, });
        }

        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        // Maintain existing where clause bounds, if any.
        if let Some(where_clause) = where_clause {
            let predicates = where_clause.predicates.iter();
            generic_where_clause.extend(quote! { #(#predicates,)* });
        }

        let mut predicates: Punctuated<TokenStream, Token![,]> = Punctuated::new();

        predicates.extend(self.type_path_predicates());

        if add_reflect_typed {
            predicates.extend(self.field_type_predicates());
        }

        generic_where_clause.extend(quote! { #predicates });

        (impl_generics, ty_generics, generic_where_clause)
    }

    fn type_path_predicates(&self) -> impl Iterator<Item = TokenStream> + '_ {
        let type_path_ = crate::path::type_path_(&self.optic_reflect_path);
        self.generics.type_params().map(move |param| {
            let ident = &param.ident;
            quote!(#ident : #type_path_)
        })
    }

    fn field_type_predicates(&self) -> Vec<TokenStream> {
        let type_param_idents = self
            .generics
            .type_params()
            .map(|type_param| type_param.ident.clone())
            .collect::<Vec<Ident>>();

        if type_param_idents.is_empty() {
            return Vec::new();
        }

        let optic_reflect_path = &self.optic_reflect_path;
        let reflect_ = crate::path::reflect_(optic_reflect_path);
        let typed_ = crate::path::typed_(optic_reflect_path);
        let struct_ = crate::path::struct_(optic_reflect_path);

        let mut predicates = Vec::new();

        for &ty in &self.active_types {
            if is_any_ident_in_token_stream(&type_param_idents, ty.to_token_stream()) {
                predicates.push(quote! {
                    #ty: #reflect_ + #typed_
                });
            }
        }

        for &ty in &self.flatten_types {
            if is_any_ident_in_token_stream(&type_param_idents, ty.to_token_stream()) {
                predicates.push(quote! {
                    #ty: #reflect_ + #typed_ + #struct_
                });
            }
        }

        predicates
    }
}

/// Do any of the identifiers in `idents` appear in `token_stream`?
fn is_any_ident_in_token_stream(idents: &[Ident], token_stream: TokenStream) -> bool {
    for token_tree in token_stream {
        match token_tree {
            proc_macro2::TokenTree::Ident(ident) => {
                if idents.contains(&ident) {
                    return true;
                }
            }
            proc_macro2::TokenTree::Group(group) => {
                if is_any_ident_in_token_stream(idents, group.stream()) {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}
