//! Compile-time type information.
//!
//! ## Menu
//!
//! - [`TypePath`]: stable type paths and names; [`DynamicTypePath`] is its
//!   object-safe mirror.
//! - [`TypePathTable`]: function-pointer vtable over one `TypePath` impl.
//! - [`Type`]: a `TypeId` plus a `TypePathTable`.
//! - [`Typed`]: static accessor to a type's [`TypeInfo`]; [`DynamicTyped`]
//!   is its object-safe mirror.
//! - [`TypeInfo`]: either [`StructInfo`] (named properties) or
//!   [`OpaqueInfo`] (everything else), classified by [`ReflectKind`].
//! - [`StructInfo`]: ordered [`PropertyInfo`] descriptors plus name index.
//! - [`PropertyInfo`]: one property's name, value type, directions,
//!   [`Visibility`], and declaring type.
//! - [`KindError`]: failed kind cast.

// -----------------------------------------------------------------------------
// Modules

mod opaque_info;
mod property_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use type_path::impl_type_fn;

// -----------------------------------------------------------------------------
// Exports

pub use opaque_info::OpaqueInfo;
pub use property_info::{PropertyInfo, Visibility};
pub use struct_info::StructInfo;
pub use type_info::{KindError, ReflectKind, TypeInfo};
pub use type_path::{DynamicTypePath, Type, TypePath, TypePathTable};
pub use typed::{DynamicTyped, Typed};
