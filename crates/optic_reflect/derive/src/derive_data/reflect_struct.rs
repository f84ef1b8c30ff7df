use proc_macro2::{Literal, Span, TokenStream};
use quote::{ToTokens, quote, quote_spanned};
use syn::spanned::Spanned;
use syn::{Field, FieldsNamed, Ident, LitStr, Type};

use super::{FieldAttributes, ReflectMeta};

// -----------------------------------------------------------------------------
// StructProperty

/// A named field together with the property it becomes.
pub(crate) struct StructProperty<'a> {
    /// The raw field.
    pub data: &'a Field,
    /// The reflection attributes on the field.
    pub attrs: FieldAttributes,
    /// The lookup name: the `rename` value when present, the field
    /// identifier otherwise.
    exposed_name: String,
}

impl<'a> StructProperty<'a> {
    fn new(data: &'a Field) -> syn::Result<Self> {
        let attrs = FieldAttributes::parse_attrs(&data.attrs)?;

        let exposed_name = match &attrs.rename {
            Some(lit) => lit.value(),
            None => data
                .ident
                .as_ref()
                .expect("only named fields reach `StructProperty`")
                .to_string(),
        };

        Ok(Self {
            data,
            attrs,
            exposed_name,
        })
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.data
            .ident
            .as_ref()
            .expect("only named fields reach `StructProperty`")
    }

    #[inline]
    pub fn ty(&self) -> &'a Type {
        &self.data.ty
    }

    #[inline]
    pub fn exposed_name(&self) -> &str {
        &self.exposed_name
    }

    /// The span lookup errors should point at: the rename literal when
    /// the name came from one, the field identifier otherwise.
    fn name_span(&self) -> Span {
        match &self.attrs.rename {
            Some(lit) => lit.span(),
            None => self.ident().span(),
        }
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        matches!(self.data.vis, syn::Visibility::Public(_))
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.attrs.write_only.is_none()
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.attrs.read_only.is_none()
    }

    /// Whether the field contributes an own property descriptor.
    #[inline]
    fn is_active(&self) -> bool {
        self.attrs.skip.is_none() && self.attrs.flatten.is_none()
    }

    /// Generates the `PropertyInfo` construction for this property.
    pub fn to_info_tokens(&self, optic_reflect_path: &syn::Path) -> TokenStream {
        let property_info_ = crate::path::property_info_(optic_reflect_path);
        let ty = self.ty();
        let name = LitStr::new(&self.exposed_name, self.name_span());

        // Spanned at the field type, so a property type without
        // reflection support reports at its declaration.
        let mut tokens = quote_spanned! { ty.span() =>
            #property_info_::new::<#ty>(#name)
        };

        if self.attrs.read_only.is_some() {
            tokens.extend(quote!(.read_only()));
        }
        if self.attrs.write_only.is_some() {
            tokens.extend(quote!(.write_only()));
        }
        if !self.is_public() {
            tokens.extend(quote!(.non_public()));
        }

        tokens
    }
}

// -----------------------------------------------------------------------------
// ReflectStruct

/// The parsed derive input of a named-field struct.
pub(crate) struct ReflectStruct<'a> {
    meta: ReflectMeta<'a>,
    properties: Vec<StructProperty<'a>>,
}

impl<'a> ReflectStruct<'a> {
    pub fn new(meta: ReflectMeta<'a>, fields: &'a FieldsNamed) -> syn::Result<Self> {
        let mut properties = Vec::with_capacity(fields.named.len());
        for field in &fields.named {
            properties.push(StructProperty::new(field)?);
        }

        // Duplicate own names would leave one property permanently
        // shadowed; descriptor shadowing is reserved for `flatten`.
        for (i, prop) in properties.iter().enumerate() {
            if !prop.is_active() {
                continue;
            }
            let taken = properties[..i]
                .iter()
                .any(|prev| prev.is_active() && prev.exposed_name == prop.exposed_name);
            if taken {
                return Err(syn::Error::new(
                    prop.name_span(),
                    format!("duplicate property name `{}`", prop.exposed_name),
                ));
            }
        }

        let mut val = Self { meta, properties };

        let active_types = val.active_properties().map(StructProperty::ty).collect();
        let flatten_types = val.flatten_properties().map(StructProperty::ty).collect();
        val.meta.set_active_types(active_types, flatten_types);

        Ok(val)
    }

    /// Access the metadata associated with this struct definition.
    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    /// The fields exposed as own properties.
    pub fn active_properties(&self) -> impl Iterator<Item = &StructProperty<'a>> {
        self.properties.iter().filter(|prop| prop.is_active())
    }

    /// The fields whose types contribute spliced properties.
    pub fn flatten_properties(&self) -> impl Iterator<Item = &StructProperty<'a>> {
        self.properties
            .iter()
            .filter(|prop| prop.attrs.skip.is_none() && prop.attrs.flatten.is_some())
    }

    /// Generates the `TypeInfo` construction for the `Typed` cell.
    ///
    /// Own descriptors come first, in declaration order; the descriptors
    /// of each flattened type are appended behind them, so an own name
    /// always wins the first-occurrence index.
    pub fn to_info_tokens(&self) -> TokenStream {
        use crate::path::fp::CloneFP;
        let clone_ = CloneFP.to_token_stream();

        let optic_reflect_path = self.meta.optic_reflect_path();
        let type_info_ = crate::path::type_info_(optic_reflect_path);
        let struct_info_ = crate::path::struct_info_(optic_reflect_path);
        let typed_ = crate::path::typed_(optic_reflect_path);

        let properties = self
            .active_properties()
            .map(|prop| prop.to_info_tokens(optic_reflect_path));
        let own = quote! {
            ::std::vec![ #(#properties),* ]
        };

        let flatten_types = self
            .flatten_properties()
            .map(StructProperty::ty)
            .collect::<Vec<&Type>>();

        if flatten_types.is_empty() {
            return quote! {
                #type_info_::Struct(#struct_info_::new::<Self>(#own))
            };
        }

        quote! {
            {
                let mut __properties = #own;
                #(
                    match <#flatten_types as #typed_>::type_info() {
                        #type_info_::Struct(__embedded) => {
                            __properties.extend(__embedded.iter().map(#clone_::clone));
                        }
                        _ => ::core::panic!(
                            "flattened property type does not expose `TypeInfo::Struct`"
                        ),
                    }
                )*
                #type_info_::Struct(#struct_info_::new::<Self>(__properties))
            }
        }
    }
}

// -----------------------------------------------------------------------------
// PropertyAccessors

/// Match-arm building blocks for the generated `Struct` implementation.
///
/// The vectors run over the own properties in declaration order; entry
/// `i` of each belongs to descriptor index `i`.
pub(crate) struct PropertyAccessors {
    /// Exposed property names.
    pub names: Vec<LitStr>,
    /// Descriptor indices, as suffixed literals.
    pub indices: Vec<Literal>,
    /// `Some(&self.field)` for readable properties, `None` otherwise.
    pub read_values: Vec<TokenStream>,
    /// `Some(&mut self.field)` for writable properties, `None` otherwise.
    pub write_values: Vec<TokenStream>,
    /// The own descriptor count.
    pub own_count: Literal,
}

impl PropertyAccessors {
    pub fn new(info: &ReflectStruct) -> Self {
        use crate::path::fp::OptionFP;
        let option_ = OptionFP.to_token_stream();

        let mut this = Self {
            names: Vec::new(),
            indices: Vec::new(),
            read_values: Vec::new(),
            write_values: Vec::new(),
            own_count: Literal::usize_suffixed(0),
        };

        for (i, prop) in info.active_properties().enumerate() {
            let member = prop.ident();

            this.names
                .push(LitStr::new(prop.exposed_name(), prop.name_span()));
            this.indices.push(Literal::usize_suffixed(i));
            this.read_values.push(if prop.is_readable() {
                quote!(#option_::Some(&self.#member))
            } else {
                quote!(#option_::None)
            });
            this.write_values.push(if prop.is_writable() {
                quote!(#option_::Some(&mut self.#member))
            } else {
                quote!(#option_::None)
            });
        }
        this.own_count = Literal::usize_suffixed(this.names.len());

        this
    }
}
