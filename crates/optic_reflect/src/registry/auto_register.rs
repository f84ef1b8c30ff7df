//! Static registration plumbing behind `#[reflect(auto_register)]`.
//!
//! The derive submits one [`AutoRegisterFn`] per annotated type through
//! `inventory`; [`AccessorRegistry::auto_register`] drains the
//! collection. Nothing here is part of the public surface.
//!
//! [`AccessorRegistry::auto_register`]: crate::registry::AccessorRegistry::auto_register

use crate::derive::Reflect;
use crate::info::Typed;
use crate::ops::Struct;
use crate::registry::AccessorRegistry;

pub use inventory;

// -----------------------------------------------------------------------------
// Collection

/// A registration hook submitted by the derive.
pub struct AutoRegisterFn(pub fn(&mut AccessorRegistry));

inventory::collect!(AutoRegisterFn);

/// Source of the hook the derive submits.
///
/// Implemented for every reflected struct type, so the derive can name
/// the hook as a plain fn item in const context.
pub trait RegisterType {
    fn register(registry: &mut AccessorRegistry);
}

impl<T: Struct + Typed> RegisterType for T {
    #[inline]
    fn register(registry: &mut AccessorRegistry) {
        registry.register::<Self>();
    }
}

/// Runs every collected hook against `registry`.
pub(crate) fn register_collected(registry: &mut AccessorRegistry) {
    for entry in inventory::iter::<AutoRegisterFn> {
        (entry.0)(registry);
    }
}

// -----------------------------------------------------------------------------
// AvailFlag

/// Sentinel registered through the same channel as user types.
///
/// Finding it after collection proves static registration works on the
/// current platform; an empty collection proves it does not.
#[derive(Reflect)]
#[reflect(auto_register)]
pub struct AvailFlag {}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use crate::access::Policy;
    use crate::derive::Reflect;
    use crate::registry::AccessorRegistry;

    #[derive(Reflect)]
    #[reflect(auto_register)]
    pub struct Antenna {
        pub gain: f32,
    }

    #[test]
    fn annotated_types_register_themselves() {
        let mut registry = AccessorRegistry::with_registered();

        // Collection is platform-dependent; where it ran, the annotated
        // type must be present and resolvable.
        if registry.auto_register() {
            assert!(registry.contains(TypeId::of::<Antenna>(), Policy::new()));
            assert!(
                registry
                    .get_with_type_name("Antenna", Policy::new())
                    .is_some()
            );
        }
    }
}
