//! Operations over reflected values.
//!
//! ## Menu
//!
//! - [`Struct`]: dynamic property access on struct-kind values; the
//!   underlying operations every accessor entry binds to.
//! - [`PropertyIter`]: iterator over a struct's readable properties.
//! - [`ReflectRef`] / [`ReflectMut`]: kind-cast views of a value.
//! - [`CloneError`]: failure of [`Reflect::reflect_clone`].
//!
//! [`Reflect::reflect_clone`]: crate::Reflect::reflect_clone

// -----------------------------------------------------------------------------
// Modules

mod clone_error;
mod kind_cast;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use clone_error::CloneError;
pub use kind_cast::{ReflectMut, ReflectRef};
pub use struct_ops::{PropertyIter, Struct};
