use proc_macro2::TokenStream;

use crate::derive_data::ReflectMeta;

/// Generate the `inventory` submission for `#[reflect(auto_register)]`.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(meta: &ReflectMeta) -> TokenStream {
    use quote::quote_spanned;

    if let Some(span) = meta.attrs().auto_register {
        // Concrete types only; a generic has no single entry to submit.
        if meta.impl_with_generic() {
            return crate::utils::empty();
        }

        let auto_register_ = crate::path::auto_register_(meta.optic_reflect_path());
        let real_ident = meta.real_ident();

        quote_spanned! { span =>
            #auto_register_::inventory::submit! {
                #auto_register_::AutoRegisterFn(
                    <#real_ident as #auto_register_::RegisterType>::register
                )
            }
        }
    } else {
        crate::utils::empty()
    }
}

/// Generate the `inventory` submission for `#[reflect(auto_register)]`.
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &ReflectMeta) -> TokenStream {
    crate::utils::empty()
}
