//! Cached property access over reflected types.
//!
//! Everything in this module is built from a [`PropertySnapshot`]: an
//! immutable record of one target type's properties, taken under a
//! [`Policy`] and fixed at construction. On top of snapshots sit three
//! layers:
//!
//! - [`Getter`] / [`Setter`], with their type-erased [`WeakGetter`] /
//!   [`WeakSetter`] forms: single-property entries that are built once,
//!   then invoked without any lookup.
//! - [`ObjectAccessor`]: a name-indexed table of weak entries over one
//!   target type, usable through `&dyn Reflect`.
//! - [`TypedAccessor`]: non-failing typed probes over a shared
//!   [`ObjectAccessor`], compiled lazily and memoized per
//!   `(name, property type)` pair.
//!
//! [`Constructor`] rounds the module out: type-erased construction
//! through a bound factory function, written with
//! [`constructor!`](crate::constructor).

mod build;
mod construct;
mod error;
mod object;
mod policy;
mod snapshot;
mod typed;

pub use build::{Getter, Setter, WeakGetter, WeakSetter};
pub use construct::{Constructor, take_arg};
pub use error::{AccessError, ConstructError};
pub use object::ObjectAccessor;
pub use policy::Policy;
pub use snapshot::PropertySnapshot;
pub use typed::TypedAccessor;
