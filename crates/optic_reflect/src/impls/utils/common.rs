use core::fmt;

use crate::Reflect;
use crate::ops::{ReflectRef, Struct};

/// A function for implementing [`Reflect::reflect_partial_eq`] on structs.
///
/// # Rules
///
/// 1. If `other` is not `Struct`, return `Some(false)`.
/// 2. If the property counts differ, return `Some(false)`.
/// 3. Compare every readable property of `other` against the same-named
///    property of `self`. Return `Some(false)` if a name is missing, and
///    propagate `None` or `Some(false)` from the properties themselves.
/// 4. Return `Some(true)`.
///
/// Write-only properties cannot be read, so they do not take part in the
/// comparison on either side.
///
/// # Example
///
/// ```ignore
/// impl Reflect for Foo {
///     // ...
///     fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
///         struct_partial_eq(self, other)
///     }
///     // ...
/// }
/// ```
#[inline(never)]
pub fn struct_partial_eq(x: &dyn Struct, y: &dyn Reflect) -> Option<bool> {
    let ReflectRef::Struct(y) = y.reflect_ref() else {
        return Some(false);
    };

    if x.property_len() != y.property_len() {
        return Some(false);
    }

    for (name, y_prop) in y.iter_properties() {
        if let Some(x_prop) = x.property(name) {
            let result = x_prop.reflect_partial_eq(y_prop);
            if result != Some(true) {
                return result;
            }
        } else {
            return Some(false);
        }
    }
    Some(true)
}

/// A function for implementing [`Reflect::reflect_debug`] on structs.
///
/// Prints the type path followed by every readable property, in descriptor
/// order. Write-only properties are skipped.
///
/// # Example
///
/// ```ignore
/// impl Reflect for Foo {
///     // ...
///     fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         struct_debug(self, f)
///     }
///     // ...
/// }
/// ```
#[inline(never)]
pub fn struct_debug(dyn_struct: &dyn Struct, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_struct(dyn_struct.reflect_type_path());

    for (name, prop) in dyn_struct.iter_properties() {
        debug.field(name, &prop as &dyn fmt::Debug);
    }
    debug.finish()
}
