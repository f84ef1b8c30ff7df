use crate::Reflect;
use crate::info::{KindError, ReflectKind};
use crate::ops::Struct;

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable, kind-specific view of a reflected value.
///
/// Produced by [`Reflect::reflect_ref`](crate::Reflect::reflect_ref);
/// this is how the accessor layer reaches the [`Struct`] operations of a
/// value held as `&dyn Reflect`.
#[derive(Clone, Copy)]
pub enum ReflectRef<'a> {
    /// A view of a property-bearing value.
    Struct(&'a dyn Struct),
    /// A view of a value without reflected internals.
    Opaque(&'a dyn Reflect),
}

impl<'a> ReflectRef<'a> {
    /// Returns the kind of the viewed value.
    #[inline]
    pub const fn kind(&self) -> ReflectKind {
        match self {
            ReflectRef::Struct(_) => ReflectKind::Struct,
            ReflectRef::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Casts into the struct view, or reports the actual kind.
    #[inline]
    pub fn as_struct(self) -> Result<&'a dyn Struct, KindError> {
        match self {
            ReflectRef::Struct(value) => Ok(value),
            other => Err(KindError {
                expected: ReflectKind::Struct,
                received: other.kind(),
            }),
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable, kind-specific view of a reflected value.
///
/// Produced by [`Reflect::reflect_mut`](crate::Reflect::reflect_mut).
pub enum ReflectMut<'a> {
    /// A mutable view of a property-bearing value.
    Struct(&'a mut dyn Struct),
    /// A mutable view of a value without reflected internals.
    Opaque(&'a mut dyn Reflect),
}

impl<'a> ReflectMut<'a> {
    /// Returns the kind of the viewed value.
    #[inline]
    pub const fn kind(&self) -> ReflectKind {
        match self {
            ReflectMut::Struct(_) => ReflectKind::Struct,
            ReflectMut::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Casts into the mutable struct view, or reports the actual kind.
    #[inline]
    pub fn as_struct(self) -> Result<&'a mut dyn Struct, KindError> {
        match self {
            ReflectMut::Struct(value) => Ok(value),
            other => Err(KindError {
                expected: ReflectKind::Struct,
                received: other.kind(),
            }),
        }
    }
}
