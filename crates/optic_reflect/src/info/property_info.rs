use crate::info::{Type, TypeInfo, TypePath, Typed};
use crate::info::impl_type_fn;

// -----------------------------------------------------------------------------
// Visibility

/// Declared visibility of a property.
///
/// Non-public properties are hidden from accessors unless the build
/// policy opts in with
/// [`include_non_public`](crate::access::Policy::include_non_public).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Visibility {
    /// Declared `pub`.
    Public,
    /// Any restricted visibility, `pub(crate)` included.
    NonPublic,
}

// -----------------------------------------------------------------------------
// PropertyInfo

/// The descriptor of a single named property.
///
/// Carries everything an accessor needs to resolve at build time: the
/// property name, its declared value type, which directions it supports,
/// its visibility, and the type that declared it.
///
/// The value's [`TypeInfo`] is stored as a function pointer and resolved
/// lazily, which keeps construction `const` and breaks cycles between
/// mutually recursive types.
///
/// # Examples
///
/// ```
/// use optic_reflect::info::{PropertyInfo, Visibility};
///
/// let prop = PropertyInfo::new::<u32>("rpm");
/// assert_eq!(prop.name(), "rpm");
/// assert!(prop.is_readable() && prop.is_writable());
/// assert_eq!(prop.visibility(), Visibility::Public);
///
/// let hidden = PropertyInfo::new::<String>("secret")
///     .write_only()
///     .non_public();
/// assert!(!hidden.is_readable());
/// assert_eq!(hidden.visibility(), Visibility::NonPublic);
/// ```
#[derive(Clone)]
pub struct PropertyInfo {
    name: &'static str,
    ty: Type,
    type_info: fn() -> &'static TypeInfo,
    declared_in: Option<fn() -> &'static str>,
    visibility: Visibility,
    readable: bool,
    writable: bool,
}

impl PropertyInfo {
    /// Creates a read-write, public descriptor for a property of type `P`.
    #[inline]
    pub const fn new<P: Typed>(name: &'static str) -> Self {
        Self {
            name,
            ty: Type::of::<P>(),
            type_info: P::type_info,
            declared_in: None,
            visibility: Visibility::Public,
            readable: true,
            writable: true,
        }
    }

    /// Removes the write direction.
    #[inline]
    pub const fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Removes the read direction.
    #[inline]
    pub const fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }

    /// Marks the property as not `pub`.
    #[inline]
    pub const fn non_public(mut self) -> Self {
        self.visibility = Visibility::NonPublic;
        self
    }

    /// Records the declaring type explicitly.
    ///
    /// [`StructInfo::new`](crate::info::StructInfo::new) stamps the
    /// containing type onto descriptors that did not set one, so this is
    /// only needed for descriptors reused across types.
    #[inline]
    pub const fn declared_in<T: TypePath>(mut self) -> Self {
        self.declared_in = Some(T::type_path);
        self
    }

    /// The property name as exposed to lookup.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The declared value type's [`TypeInfo`].
    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Path of the type that declared this property, if recorded.
    #[inline]
    pub fn declaring_type_path(&self) -> Option<&'static str> {
        self.declared_in.map(|f| f())
    }

    /// Declared visibility.
    #[inline(always)]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Whether the property supports reads.
    #[inline(always)]
    pub const fn is_readable(&self) -> bool {
        self.readable
    }

    /// Whether the property supports writes.
    #[inline(always)]
    pub const fn is_writable(&self) -> bool {
        self.writable
    }

    /// Whether the property is declared `pub`.
    #[inline(always)]
    pub const fn is_public(&self) -> bool {
        matches!(self.visibility, Visibility::Public)
    }

    impl_type_fn!(ty);

    #[inline]
    pub(crate) fn stamp_declared_in(&mut self, declaring: fn() -> &'static str) {
        if self.declared_in.is_none() {
            self.declared_in = Some(declaring);
        }
    }
}

impl core::fmt::Debug for PropertyInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertyInfo")
            .field("name", &self.name)
            .field("type", &self.ty)
            .field("declared_in", &self.declaring_type_path())
            .field("visibility", &self.visibility)
            .field("readable", &self.readable)
            .field("writable", &self.writable)
            .finish()
    }
}
