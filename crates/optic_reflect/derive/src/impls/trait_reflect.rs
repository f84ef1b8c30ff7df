use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;

/// Generate implementation code for the `Reflect` trait.
///
/// The three `reflect_*` parameters carry the flag-dependent method
/// bodies, see the `get_struct_*_impl` functions in
/// [`struct_kind`](super::struct_kind).
pub(crate) fn impl_trait_reflect(
    meta: &ReflectMeta,
    reflect_clone_tokens: TokenStream,
    reflect_partial_eq_tokens: TokenStream,
    reflect_debug_tokens: TokenStream,
) -> TokenStream {
    use crate::path::fp::{BoxFP, ResultFP};

    let optic_reflect_path = meta.optic_reflect_path();
    let reflect_ = crate::path::reflect_(optic_reflect_path);
    let reflect_kind_ = crate::path::reflect_kind_(optic_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(optic_reflect_path);
    let reflect_mut_ = crate::path::reflect_mut_(optic_reflect_path);

    let real_ident = meta.real_ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true);

    quote! {
        impl #impl_generics #reflect_ for #real_ident #ty_generics #where_clause {
            #[inline]
            fn as_reflect(&self) -> &dyn #reflect_ {
                self
            }

            #[inline]
            fn as_reflect_mut(&mut self) -> &mut dyn #reflect_ {
                self
            }

            #[inline]
            fn into_reflect(self: #BoxFP<Self>) -> #BoxFP<dyn #reflect_> {
                self
            }

            fn set(
                &mut self,
                value: #BoxFP<dyn #reflect_>,
            ) -> #ResultFP<(), #BoxFP<dyn #reflect_>> {
                *self = value.take::<Self>()?;
                #ResultFP::Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> #reflect_kind_ {
                #reflect_kind_::Struct
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::Struct(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::Struct(self)
            }

            #reflect_clone_tokens

            #reflect_partial_eq_tokens

            #reflect_debug_tokens
        }
    }
}
