//! Parsing of `#[reflect(...)]` attributes on types and properties.

use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr};

use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Shared helpers

/// Record a bare flag, rejecting repeats.
fn set_flag(slot: &mut Option<Span>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate `reflect` attribute"));
    }
    *slot = Some(meta.path.span());
    Ok(())
}

/// Record a `name = "..."` value, rejecting repeats.
fn set_lit(slot: &mut Option<LitStr>, meta: &ParseNestedMeta) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error("duplicate `reflect` attribute"));
    }
    *slot = Some(meta.value()?.parse()?);
    Ok(())
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// The `#[reflect(...)]` attributes accepted at the type level.
///
/// Flags keep the span they were written at, so the generated code that
/// depends on them points back to the attribute when it fails to compile.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// Standard `Clone` is available; `reflect_clone` uses it.
    pub clone: Option<Span>,
    /// Standard `PartialEq` is available; `reflect_partial_eq` uses it
    /// instead of the property walker.
    pub partial_eq: Option<Span>,
    /// Standard `Debug` is available; `reflect_debug` uses it instead of
    /// the property walker.
    pub debug: Option<Span>,
    /// Submit the type for static registration.
    pub auto_register: Option<Span>,
    /// Custom stable path, the type name included: `"you::me::Foo"`.
    pub type_path: Option<LitStr>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("clone") {
                    set_flag(&mut this.clone, &meta)
                } else if meta.path.is_ident("partial_eq") {
                    set_flag(&mut this.partial_eq, &meta)
                } else if meta.path.is_ident("debug") {
                    set_flag(&mut this.debug, &meta)
                } else if meta.path.is_ident("auto_register") {
                    set_flag(&mut this.auto_register, &meta)
                } else if meta.path.is_ident("type_path") {
                    set_lit(&mut this.type_path, &meta)
                } else {
                    Err(meta.error(
                        "unknown `reflect` type attribute; expected one of \
                         `clone`, `partial_eq`, `debug`, `type_path`, `auto_register`",
                    ))
                }
            })?;
        }

        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// The `#[reflect(...)]` attributes accepted on a single property.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    /// Leave the field out of the reflection surface entirely.
    pub skip: Option<Span>,
    /// Expose the property for reads only.
    pub read_only: Option<Span>,
    /// Expose the property for writes only.
    pub write_only: Option<Span>,
    /// Splice the properties of the field's type into the containing one.
    pub flatten: Option<Span>,
    /// Expose the property under this name instead of the field ident.
    pub rename: Option<LitStr>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    set_flag(&mut this.skip, &meta)
                } else if meta.path.is_ident("read_only") {
                    set_flag(&mut this.read_only, &meta)
                } else if meta.path.is_ident("write_only") {
                    set_flag(&mut this.write_only, &meta)
                } else if meta.path.is_ident("flatten") {
                    set_flag(&mut this.flatten, &meta)
                } else if meta.path.is_ident("rename") {
                    set_lit(&mut this.rename, &meta)
                } else {
                    Err(meta.error(
                        "unknown `reflect` property attribute; expected one of \
                         `skip`, `read_only`, `write_only`, `rename`, `flatten`",
                    ))
                }
            })?;
        }

        this.validate()?;

        Ok(this)
    }

    /// Reject combinations with no sensible meaning.
    ///
    /// The conflicts are checked after all attributes are collected
    /// because the flags may be spread over several `#[reflect(...)]`
    /// lists on the same field.
    fn validate(&self) -> syn::Result<()> {
        if self.skip.is_some() {
            let conflict = self
                .read_only
                .or(self.write_only)
                .or(self.flatten)
                .or_else(|| self.rename.as_ref().map(LitStr::span));

            if let Some(span) = conflict {
                return Err(syn::Error::new(
                    span,
                    "`skip` removes the property entirely and cannot be \
                     combined with other property attributes",
                ));
            }
        }

        if let (Some(_), Some(span)) = (self.read_only, self.write_only) {
            return Err(syn::Error::new(
                span,
                "`read_only` and `write_only` are mutually exclusive",
            ));
        }

        if self.flatten.is_some() {
            let conflict = self
                .read_only
                .or(self.write_only)
                .or_else(|| self.rename.as_ref().map(LitStr::span));

            if let Some(span) = conflict {
                return Err(syn::Error::new(
                    span,
                    "`flatten` properties take their names and directions \
                     from the flattened type",
                ));
            }
        }

        Ok(())
    }
}
