use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;
use crate::path::fp::OptionFP;

fn static_path_cell(optic_reflect_path: &syn::Path, generator: TokenStream) -> TokenStream {
    let path_cell_ = crate::path::generic_type_path_cell_(optic_reflect_path);

    quote! {
        static CELL: #path_cell_ = #path_cell_::new();
        CELL.get_or_insert::<Self>(|| {
            #generator
        })
    }
}

/// Generate implementation code for `TypePath`.
///
/// Non-generic types get their strings as compile-time constants;
/// generic types assemble them once per concrete instantiation through
/// the path cell.
pub(crate) fn impl_trait_type_path(meta: &ReflectMeta) -> TokenStream {
    let optic_reflect_path = meta.optic_reflect_path();
    let trait_type_path_ = crate::path::type_path_(optic_reflect_path);

    let real_ident = meta.real_ident();

    let (type_path, type_name, inline_flag) = if meta.impl_with_generic() {
        (
            static_path_cell(optic_reflect_path, meta.type_path().into_owned()),
            static_path_cell(optic_reflect_path, meta.type_name().into_owned()),
            crate::utils::empty(),
        )
    } else {
        (
            meta.type_path().into_borrowed(),
            meta.type_name().into_borrowed(),
            quote! { #[inline] },
        )
    };

    let type_ident = meta.type_ident().into_borrowed();
    let module_path = meta.module_path().into_borrowed();

    let (impl_generics, ty_generics, where_clause) = meta.split_generics(false);

    quote! {
        impl #impl_generics #trait_type_path_ for #real_ident #ty_generics #where_clause {
            #inline_flag
            fn type_path() -> &'static str {
                #type_path
            }

            #inline_flag
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn type_ident() -> &'static str {
                #type_ident
            }

            #[inline]
            fn module_path() -> #OptionFP<&'static str> {
                #OptionFP::Some(#module_path)
            }
        }
    }
}
