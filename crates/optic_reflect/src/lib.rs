#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro always emits `optic_reflect::` paths. Inside this crate
// (tests and doctests included) that name has to resolve to `crate`, so we
// register the crate as its own extern alias.
extern crate self as optic_reflect;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod access;
pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use reflection::Reflect;
pub use optic_reflect_derive as derive;
