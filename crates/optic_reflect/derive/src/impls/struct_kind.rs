use proc_macro2::TokenStream;
use quote::{ToTokens, quote, quote_spanned};
use syn::Ident;

use super::{get_auto_register_impl, impl_trait_reflect};
use super::{impl_trait_type_path, impl_trait_typed};

use crate::derive_data::{PropertyAccessors, ReflectMeta, ReflectStruct, StructProperty};

/// Implement full reflection for a named-field struct.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();

    // trait: TypePath
    let type_path_trait_tokens = impl_trait_type_path(meta);

    // trait: Typed
    let typed_trait_tokens = impl_trait_typed(meta, info.to_info_tokens());

    // trait: Struct
    let struct_trait_tokens = impl_trait_struct(info);

    // trait: Reflect
    let reflect_trait_tokens = {
        let reflect_clone_tokens = get_struct_clone_impl(meta);
        let reflect_partial_eq_tokens = get_struct_partial_eq_impl(meta);
        let reflect_debug_tokens = get_struct_debug_impl(meta);

        impl_trait_reflect(
            meta,
            reflect_clone_tokens,
            reflect_partial_eq_tokens,
            reflect_debug_tokens,
        )
    };

    // feature: auto_register
    let auto_register_tokens = get_auto_register_impl(meta);

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #struct_trait_tokens

        #reflect_trait_tokens

        #auto_register_tokens
    }
}

/// Generate `Struct` trait implementation tokens.
///
/// Own properties become direct match arms; a write-only property still
/// claims its name and index with a `None` arm, so it shadows any
/// same-named flattened property. Lookups that miss every own arm fall
/// through to the flattened fields: by-index lookups peel the embedded
/// descriptor ranges off in order, by-name lookups resolve through the
/// type's own descriptor index so flatten shadowing stays exact.
fn impl_trait_struct(info: &ReflectStruct) -> TokenStream {
    use crate::path::fp::OptionFP;
    let option_ = OptionFP.to_token_stream();

    let meta = info.meta();
    let optic_reflect_path = meta.optic_reflect_path();
    let struct_ = crate::path::struct_(optic_reflect_path);
    let reflect_ = crate::path::reflect_(optic_reflect_path);
    let typed_ = crate::path::typed_(optic_reflect_path);
    let property_iter_ = crate::path::property_iter_(optic_reflect_path);

    let PropertyAccessors {
        names,
        indices,
        read_values,
        write_values,
        own_count,
    } = PropertyAccessors::new(info);

    let flatten_members = info
        .flatten_properties()
        .map(StructProperty::ident)
        .collect::<Vec<&Ident>>();

    let property_len;
    let name_read_fallback;
    let name_write_fallback;
    let index_read_fallback;
    let index_write_fallback;
    let index_name_fallback;

    if flatten_members.is_empty() {
        property_len = own_count.to_token_stream();
        name_read_fallback = quote!(#OptionFP::None);
        name_write_fallback = name_read_fallback.clone();
        index_read_fallback = name_read_fallback.clone();
        index_write_fallback = name_read_fallback.clone();
        index_name_fallback = name_read_fallback.clone();
    } else {
        property_len = quote! {
            #own_count #( + #struct_::property_len(&self.#flatten_members) )*
        };
        name_read_fallback = quote! {
            {
                let __info = <Self as #typed_>::type_info().as_struct().ok()?;
                <Self as #struct_>::property_at(self, __info.index_of(name)?)
            }
        };
        name_write_fallback = quote! {
            {
                let __info = <Self as #typed_>::type_info().as_struct().ok()?;
                <Self as #struct_>::property_at_mut(self, __info.index_of(name)?)
            }
        };

        let read_chain = flatten_index_chain(&struct_, &flatten_members, |member| {
            quote!(#struct_::property_at(&self.#member, __index))
        });
        let write_chain = flatten_index_chain(&struct_, &flatten_members, |member| {
            quote!(#struct_::property_at_mut(&mut self.#member, __index))
        });
        let name_chain = flatten_index_chain(&struct_, &flatten_members, |member| {
            quote!(#struct_::name_at(&self.#member, __index))
        });

        index_read_fallback = quote! {
            {
                let __index = index - #own_count;
                #read_chain
            }
        };
        index_write_fallback = quote! {
            {
                let __index = index - #own_count;
                #write_chain
            }
        };
        index_name_fallback = quote! {
            {
                let __index = index - #own_count;
                #name_chain
            }
        };
    }

    let real_ident = meta.real_ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true);

    quote! {
        impl #impl_generics #struct_ for #real_ident #ty_generics #where_clause {
            fn property(&self, name: &str) -> #OptionFP<&dyn #reflect_> {
                match name {
                    #(#names => #read_values,)*
                    _ => #name_read_fallback,
                }
            }

            fn property_mut(&mut self, name: &str) -> #OptionFP<&mut dyn #reflect_> {
                match name {
                    #(#names => #write_values,)*
                    _ => #name_write_fallback,
                }
            }

            fn property_at(&self, index: usize) -> #OptionFP<&dyn #reflect_> {
                match index {
                    #(#indices => #read_values,)*
                    _ => #index_read_fallback,
                }
            }

            fn property_at_mut(&mut self, index: usize) -> #OptionFP<&mut dyn #reflect_> {
                match index {
                    #(#indices => #write_values,)*
                    _ => #index_write_fallback,
                }
            }

            fn name_at(&self, index: usize) -> #OptionFP<&str> {
                match index {
                    #(#indices => #option_::Some(#names),)*
                    _ => #index_name_fallback,
                }
            }

            #[inline]
            fn property_len(&self) -> usize {
                #property_len
            }

            #[inline]
            fn iter_properties(&self) -> #property_iter_<'_> {
                #property_iter_::new(self)
            }
        }
    }
}

/// Chain an out-of-range index through the flattened fields.
///
/// `__index` starts relative to the first embedded descriptor range;
/// each level either answers from its field or descends with the range
/// length subtracted. The innermost miss is `None`.
fn flatten_index_chain(
    struct_: &TokenStream,
    members: &[&Ident],
    hit: impl Fn(&Ident) -> TokenStream,
) -> TokenStream {
    use crate::path::fp::OptionFP;

    let mut chain = quote!(#OptionFP::None);
    let mut innermost = true;

    for &member in members.iter().rev() {
        let call = hit(member);
        let descend = if innermost {
            innermost = false;
            chain
        } else {
            quote! {
                let __index = __index - __len;
                #chain
            }
        };
        chain = quote! {
            {
                let __len = #struct_::property_len(&self.#member);
                if __index < __len {
                    #call
                } else {
                    #descend
                }
            }
        };
    }

    chain
}

/// Generate `Reflect::reflect_clone` implementation tokens.
fn get_struct_clone_impl(meta: &ReflectMeta) -> TokenStream {
    use crate::path::fp::{BoxFP, CloneFP, CowFP, ResultFP};

    let optic_reflect_path = meta.optic_reflect_path();
    let reflect_ = crate::path::reflect_(optic_reflect_path);
    let clone_error_ = crate::path::clone_error_(optic_reflect_path);

    if let Some(span) = meta.attrs().clone {
        quote_spanned! { span =>
            #[inline]
            fn reflect_clone(&self) -> #ResultFP<#BoxFP<dyn #reflect_>, #clone_error_> {
                #ResultFP::Ok(#BoxFP::new(<Self as #CloneFP>::clone(self)))
            }
        }
    } else {
        let type_path_ = crate::path::type_path_(optic_reflect_path);
        quote! {
            #[inline]
            fn reflect_clone(&self) -> #ResultFP<#BoxFP<dyn #reflect_>, #clone_error_> {
                #ResultFP::Err(#clone_error_::NotCloneable {
                    type_path: #CowFP::Borrowed(<Self as #type_path_>::type_path()),
                })
            }
        }
    }
}

/// Generate `Reflect::reflect_partial_eq` implementation tokens.
fn get_struct_partial_eq_impl(meta: &ReflectMeta) -> TokenStream {
    use crate::path::fp::{OptionFP, PartialEqFP};

    let optic_reflect_path = meta.optic_reflect_path();
    let reflect_ = crate::path::reflect_(optic_reflect_path);

    if let Some(span) = meta.attrs().partial_eq {
        quote_spanned! { span =>
            #[inline]
            fn reflect_partial_eq(&self, other: &dyn #reflect_) -> #OptionFP<bool> {
                if let #OptionFP::Some(other) = other.downcast_ref::<Self>() {
                    return #OptionFP::Some(<Self as #PartialEqFP>::eq(self, other));
                }
                #OptionFP::Some(false)
            }
        }
    } else {
        let struct_partial_eq_ = crate::path::struct_partial_eq_(optic_reflect_path);
        quote! {
            #[inline]
            fn reflect_partial_eq(&self, other: &dyn #reflect_) -> #OptionFP<bool> {
                #struct_partial_eq_(self, other)
            }
        }
    }
}

/// Generate `Reflect::reflect_debug` implementation tokens.
fn get_struct_debug_impl(meta: &ReflectMeta) -> TokenStream {
    use crate::path::fp::DebugFP;

    if let Some(span) = meta.attrs().debug {
        quote_spanned! { span =>
            #[inline]
            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                <Self as #DebugFP>::fmt(self, f)
            }
        }
    } else {
        let struct_debug_ = crate::path::struct_debug_(meta.optic_reflect_path());
        quote! {
            #[inline]
            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                #struct_debug_(self, f)
            }
        }
    }
}
