//! Token generators for the derived trait implementations.

// -----------------------------------------------------------------------------
// Modules

mod struct_kind;

mod auto_register;
mod trait_reflect;
mod trait_type_path;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

use auto_register::get_auto_register_impl;
use trait_reflect::impl_trait_reflect;
use trait_type_path::impl_trait_type_path;
use trait_typed::impl_trait_typed;

pub(crate) use struct_kind::impl_struct;
