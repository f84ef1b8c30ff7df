use crate::info::{OpaqueInfo, StructInfo, Type};

// -----------------------------------------------------------------------------
// ReflectKind

/// The structural kind of a reflected type.
///
/// Property accessors only distinguish two shapes: types that expose
/// named properties, and everything else.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ReflectKind {
    /// A type with named properties, such as a struct.
    Struct,
    /// A type whose internals are not reflected, such as `u64` or `String`.
    Opaque,
}

impl core::fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReflectKind::Struct => f.pad("struct"),
            ReflectKind::Opaque => f.pad("opaque"),
        }
    }
}

// -----------------------------------------------------------------------------
// KindError

/// A cast to a kind-specific view was attempted on the wrong kind.
///
/// # Examples
///
/// ```
/// use optic_reflect::info::Typed;
///
/// let info = <u32 as Typed>::type_info();
/// let err = info.as_struct().unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "kind mismatch: expected struct, received opaque",
/// );
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct KindError {
    /// The kind the caller asked for.
    pub expected: ReflectKind,
    /// The kind actually present.
    pub received: ReflectKind,
}

impl core::fmt::Display for KindError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl core::error::Error for KindError {}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time information of a reflected type.
///
/// Obtained through [`Typed::type_info`](crate::info::Typed::type_info)
/// or, from a value, through
/// [`DynamicTyped::reflect_type_info`](crate::info::DynamicTyped::reflect_type_info).
/// Always `&'static`: each type's information is built on first request
/// and cached.
#[derive(Debug)]
pub enum TypeInfo {
    /// A type with named properties; carries a [`StructInfo`].
    Struct(StructInfo),
    /// A property-less type; carries an [`OpaqueInfo`].
    Opaque(OpaqueInfo),
}

impl TypeInfo {
    /// Returns the underlying [`Type`].
    #[inline]
    pub const fn ty(&self) -> &Type {
        match self {
            TypeInfo::Struct(info) => info.ty(),
            TypeInfo::Opaque(info) => info.ty(),
        }
    }

    /// Returns the `TypeId`.
    #[inline]
    pub const fn ty_id(&self) -> core::any::TypeId {
        self.ty().id()
    }

    /// Returns the type path.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// Returns the type name.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty().name()
    }

    /// Returns the [`ReflectKind`] of this information.
    #[inline]
    pub const fn kind(&self) -> ReflectKind {
        match self {
            TypeInfo::Struct(_) => ReflectKind::Struct,
            TypeInfo::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Returns `true` for [`TypeInfo::Struct`].
    #[inline]
    pub const fn is_struct(&self) -> bool {
        matches!(self, TypeInfo::Struct(_))
    }

    /// Casts to a [`StructInfo`], or reports the actual kind.
    #[inline]
    pub const fn as_struct(&self) -> Result<&StructInfo, KindError> {
        match self {
            TypeInfo::Struct(info) => Ok(info),
            _ => Err(KindError {
                expected: ReflectKind::Struct,
                received: self.kind(),
            }),
        }
    }

    /// Casts to an [`OpaqueInfo`], or reports the actual kind.
    #[inline]
    pub const fn as_opaque(&self) -> Result<&OpaqueInfo, KindError> {
        match self {
            TypeInfo::Opaque(info) => Ok(info),
            _ => Err(KindError {
                expected: ReflectKind::Opaque,
                received: self.kind(),
            }),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::info::Typed;

    #[test]
    fn opaque_info_round_trip() {
        let info = <String as Typed>::type_info();
        assert!(!info.is_struct());
        assert_eq!(info.type_path(), "std::string::String");
        assert!(info.as_opaque().is_ok());
        assert!(info.as_struct().is_err());
    }
}
