use crate::Reflect;
use crate::info::{Type, TypePath};
use crate::info::impl_type_fn;

/// Information for types whose internals stay hidden from reflection.
///
/// Primitives, strings, and every other type without named properties
/// fall under this kind; accessors treat their values as indivisible.
#[derive(Debug, Clone)]
pub struct OpaqueInfo {
    ty: Type,
}

impl OpaqueInfo {
    /// Creates a new [`OpaqueInfo`].
    #[inline]
    pub const fn new<T: Reflect + TypePath + ?Sized>() -> Self {
        Self {
            ty: Type::of::<T>(),
        }
    }

    impl_type_fn!(ty);
}
