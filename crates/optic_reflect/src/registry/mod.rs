//! Shared accessor storage with name-based lookup.
//!
//! ## Menu
//!
//! - [`AccessorRegistry`]: a central store handing out one shared
//!   [`ObjectAccessor`] per `(target, policy)` pair, with lookup by
//!   `TypeId`, full type path, or short type name.
//! - [`AccessorRegistryArc`]: the registry behind an `Arc<RwLock>`, for
//!   sharing across threads.
//!
//! ## auto_register
//!
//! See [`AccessorRegistry::auto_register`].
//!
//! We use the `inventory` crate to implement static registration; not
//! all platforms support it (although major platforms do). Where it is
//! unsupported, collection is a no-op and `auto_register` reports
//! `false` without causing any errors.
//!
//! [`ObjectAccessor`]: crate::access::ObjectAccessor

// -----------------------------------------------------------------------------
// Modules

mod accessor_registry;

#[cfg(feature = "auto_register")]
#[doc(hidden)]
pub mod auto_register;

// -----------------------------------------------------------------------------
// Exports

pub use accessor_registry::{AccessorRegistry, AccessorRegistryArc};
