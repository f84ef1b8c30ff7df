//! Small token helpers shared by every generator.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{LitStr, spanned::Spanned};

/// Create a empty token stream.
#[inline(always)]
pub(crate) fn empty() -> TokenStream {
    TokenStream::new()
}

// -----------------------------------------------------------------------------
// StringExpr

/// An enum representing different types of string expressions
#[derive(Clone)]
pub(crate) enum StringExpr {
    /// A string that is valid at compile time.
    ///
    /// In most cases, this is a string lit, such as: `"mystring"`.
    ///
    /// But sometimes, this also includes macros, such as: `module_path!()`
    Const(TokenStream),
    /// A [string slice](str) that is borrowed for a `'static` lifetime.
    ///
    /// For example: `<T as TypePath>::type_path()`.
    Borrowed(TokenStream),
    /// An [owned string](String).
    Owned(TokenStream),
}

impl<T: ToString + Spanned> From<T> for StringExpr {
    fn from(value: T) -> Self {
        Self::Const(LitStr::new(&value.to_string(), value.span()).to_token_stream())
    }
}

impl StringExpr {
    /// Creates a [constant] [`StringExpr`] from a [`struct@LitStr`].
    ///
    /// [constant]: StringExpr::Const
    pub fn from_lit(lit: &LitStr) -> Self {
        Self::Const(lit.to_token_stream())
    }

    /// Creates a [constant] [`StringExpr`] by interpreting a
    /// [string slice][str] as a [`struct@LitStr`].
    ///
    /// [constant]: StringExpr::Const
    pub fn from_str(string: &str) -> Self {
        Self::Const(string.to_token_stream())
    }

    /// Returns tokens for a statically borrowed [string slice](str).
    pub fn into_borrowed(self) -> TokenStream {
        match self {
            Self::Const(tokens) | Self::Borrowed(tokens) => tokens,
            Self::Owned(owned) => quote! {
                &#owned as &str
            },
        }
    }

    /// Returns tokens for an [owned string](String).
    pub fn into_owned(self) -> TokenStream {
        match self {
            Self::Const(tokens) | Self::Borrowed(tokens) => quote! {
                ::std::borrow::ToOwned::to_owned(#tokens)
            },
            Self::Owned(owned) => owned,
        }
    }

    /// Get inner TokenStream if self is const string expr.
    ///
    /// # Panic
    /// - self is not const string expr.
    fn into_const(self) -> TokenStream {
        match self {
            StringExpr::Const(token_stream) => token_stream,
            _ => unreachable!(), // See: [`StringExpr::from_iter`]
        }
    }

    /// Check if self is const expression
    fn is_const(&self) -> bool {
        matches!(self, StringExpr::Const(_))
    }

    /// concat string from iterator
    ///
    /// If all expressions are [`StringExpr::Const`] this will use
    /// [`concat`] to merge them; otherwise the pieces are joined at run
    /// time through the concatenation helper of the reflection crate.
    pub fn from_iter<T: IntoIterator<Item = StringExpr>>(
        iter: T,
        optic_reflect_path: &syn::Path,
    ) -> Self {
        let exprs: Vec<StringExpr> = iter.into_iter().collect();

        if exprs.is_empty() {
            return Self::Const("".to_token_stream());
        }

        if exprs.iter().all(StringExpr::is_const) {
            let inner = exprs.into_iter().map(StringExpr::into_const);

            Self::Const(quote! {
                ::core::concat!( #(#inner),* )
            })
        } else {
            let concat_ = crate::path::concat_(optic_reflect_path);
            let inner = exprs.into_iter().map(StringExpr::into_borrowed);

            Self::Owned(quote! {
                #concat_(&[ #(#inner),* ])
            })
        }
    }
}
