//! This independent module is used to provide the required path.
//! So as to minimize changes when the `optic_reflect` structure is modified.
//!
//! The only special path is the reflection crate itself, see the
//! [`optic_reflect`] function doc.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the access path to the `optic_reflect` crate.
///
/// This is always `::optic_reflect`: the crate registers itself under that
/// name with `extern crate self`, so the emitted code resolves both inside
/// the reflection crate and in its direct dependents. Crates that only
/// depend on a re-export still need `optic_reflect` in their own
/// dependency table for the derive to resolve.
pub(crate) fn optic_reflect() -> syn::Path {
    syn::parse_quote!(::optic_reflect)
}

// -----------------------------------------------------------------------------
// info

#[inline(always)]
pub(crate) fn type_path_(optic_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #optic_reflect_path::info::TypePath
    }
}

#[inline(always)]
pub(crate) fn typed_(optic_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #optic_reflect_path::info::Typed
    }
}

#[inline(always)]
pub(crate) fn type_info_(optic_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #optic_reflect_path::info::TypeInfo
    }
}

#[inline(always)]
pub(crate) fn struct_info_(optic_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #optic_reflect_path::info::StructInfo
    }
}

#[inline(always)]
pub(crate) fn property_info_(optic_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #optic_reflect_path::info::PropertyInfo
    }
}

#[inline(always)]
pub(crate) fn reflect_kind_(optic_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #optic_reflect_path::info::ReflectKind
    }
}

// -----------------------------------------------------------------------------
// ops

#[inline]
pub(crate) fn struct_(optic_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #optic_reflect_path::ops::Struct
    }
}

#[inline]
pub(crate) fn property_iter_(optic_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #optic_reflect_path::ops::PropertyIter
    }
}

#[inline]
pub(crate) fn reflect_ref_(optic_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #optic_reflect_path::ops::ReflectRef
    }
}

#[inline]
pub(crate) fn reflect_mut_(optic_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #optic_reflect_path::ops::ReflectMut
    }
}

#[inline]
pub(crate) fn clone_error_(optic_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #optic_reflect_path::ops::CloneError
    }
}

// -----------------------------------------------------------------------------
// impls

#[inline(always)]
pub(crate) fn reflect_(optic_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #optic_reflect_path::Reflect
    }
}

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(optic_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #optic_reflect_path::impls::NonGenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn generic_type_info_cell_(optic_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #optic_reflect_path::impls::GenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn generic_type_path_cell_(optic_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #optic_reflect_path::impls::GenericTypePathCell
    }
}

#[inline(always)]
pub(crate) fn concat_(optic_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #optic_reflect_path::impls::concat
    }
}

#[inline(always)]
pub(crate) fn struct_partial_eq_(optic_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #optic_reflect_path::impls::struct_partial_eq
    }
}

#[inline(always)]
pub(crate) fn struct_debug_(optic_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #optic_reflect_path::impls::struct_debug
    }
}

// -----------------------------------------------------------------------------
// registry

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(optic_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #optic_reflect_path::registry::auto_register
    }
}

// -----------------------------------------------------------------------------
// Full paths of std items

pub(crate) mod fp {
    use proc_macro2::TokenStream;
    use quote::{ToTokens, quote};

    macro_rules! full_path {
        ($(#[$outer:meta])* $name:ident => $($path:tt)+) => {
            $(#[$outer])*
            pub(crate) struct $name;

            impl ToTokens for $name {
                #[inline]
                fn to_tokens(&self, tokens: &mut TokenStream) {
                    tokens.extend(quote!( $($path)+ ));
                }
            }
        };
    }

    full_path!(
        /// `::core::option::Option`
        OptionFP => ::core::option::Option
    );
    full_path!(
        /// `::core::result::Result`
        ResultFP => ::core::result::Result
    );
    full_path!(
        /// `::std::boxed::Box`
        BoxFP => ::std::boxed::Box
    );
    full_path!(
        /// `::std::borrow::Cow`
        CowFP => ::std::borrow::Cow
    );
    full_path!(
        /// `::core::clone::Clone`
        CloneFP => ::core::clone::Clone
    );
    full_path!(
        /// `::core::cmp::PartialEq`
        PartialEqFP => ::core::cmp::PartialEq
    );
    full_path!(
        /// `::core::fmt::Debug`
        DebugFP => ::core::fmt::Debug
    );
    full_path!(
        /// `::core::any::Any`
        AnyFP => ::core::any::Any
    );
    full_path!(
        /// `::core::marker::Send`
        SendFP => ::core::marker::Send
    );
    full_path!(
        /// `::core::marker::Sync`
        SyncFP => ::core::marker::Sync
    );
}
