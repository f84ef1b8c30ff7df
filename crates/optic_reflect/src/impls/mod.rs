//! Reflection trait implementations and the utilities to write more.
//!
//! - [`concat`]: An efficient string concatenation function.
//! - [`NonGenericTypeInfoCell`]: Used to implement [`Typed`] for non-generic types.
//! - [`GenericTypeInfoCell`]: Used to implement [`Typed`] for generic types.
//! - [`GenericTypePathCell`]: Used to implement [`TypePath`] for generic types.
//! - [`struct_partial_eq`], [`struct_debug`]: Used to implement
//!   [`Reflect::reflect_partial_eq`] and [`Reflect::reflect_debug`] for structs.
//!
//! ## Implemented Menu
//!
//! Opaque leaf implementations are provided for:
//!
//! - basic: `i8`-`i128`, `u8`-`u128`, `isize`, `usize`, `f32`, `f64`, `bool`,
//!   `char`, `&'static str`
//! - core: `Option<T>`
//! - alloc: `String`, `Vec<T>`
//!
//! Every other type reaches the reflection surface through
//! [`#[derive(Reflect)]`](crate::derive::Reflect) or a manual implementation.
//!
//! Type paths of the built-in implementations use the `std`-facing module
//! names, so `String` is `"std::string::String"` and `Option<u32>` is
//! `"std::option::Option<u32>"`.
//!
//! [`Reflect::reflect_partial_eq`]: crate::Reflect::reflect_partial_eq
//! [`Reflect::reflect_debug`]: crate::Reflect::reflect_debug
//! [`Typed`]: crate::info::Typed
//! [`TypePath`]: crate::info::TypePath

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod utils;

mod alloc;
mod core;
mod native;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};

pub use utils::*;

/// An efficient string concatenation function.
///
/// This is usually used for the implementation of `TypePath`.
///
/// # Example
///
/// ```
/// use optic_reflect::impls;
///
/// let s = impls::concat(&["module", "::", "name", "<", "T", ">"]);
///
/// assert_eq!(s, "module::name<T>");
/// assert_eq!(s.capacity(), 15);
/// ```
///
/// Inline is prohibited here to reduce compilation time.
#[inline(never)]
pub fn concat(arr: &[&str]) -> String {
    let mut len = 0usize;
    for &item in arr {
        len += item.len();
    }
    let mut res = String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}
