use core::any::{Any, TypeId};

// -----------------------------------------------------------------------------
// TypePath

/// A static accessor to stable type paths and names.
///
/// Unlike [`core::any::type_name`], the strings returned here are part of
/// the API contract: they do not shift between compiler versions, and they
/// are what accessor errors print when naming a type.
///
/// # Methods
///
/// - [`type_path`]: the unique identifier of the type, never duplicated.
/// - [`type_name`]: the name without module path; duplicates allowed.
/// - [`type_ident`]: the name without module path and generics.
/// - [`module_path`]: optional module path.
///
/// None of the names carry a leading `::`; manual implementations must
/// uphold that too.
///
/// # Implementation
///
/// [`#[derive(Reflect)]`](crate::derive::Reflect) implements this trait
/// from the type's definition site. Manual implementations are simple for
/// non-generic types:
///
/// ```
/// use optic_reflect::info::TypePath;
///
/// struct Rotor;
///
/// impl TypePath for Rotor {
///     fn type_path() -> &'static str { "workshop::parts::Rotor" }
///     fn type_name() -> &'static str { "Rotor" }
///     fn type_ident() -> &'static str { "Rotor" }
///     fn module_path() -> Option<&'static str> { Some("workshop::parts") }
/// }
/// ```
///
/// Generic types build their strings once through
/// [`GenericTypePathCell`](crate::impls::GenericTypePathCell):
///
/// ```
/// use optic_reflect::impls::{concat, GenericTypePathCell};
/// use optic_reflect::info::TypePath;
///
/// struct Pair<T>(T, T);
///
/// impl<T: TypePath> TypePath for Pair<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| {
///             concat(&["workshop::parts::Pair", "<", T::type_path(), ">"])
///         })
///     }
///     fn type_name() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| {
///             concat(&["Pair", "<", T::type_name(), ">"])
///         })
///     }
///     fn type_ident() -> &'static str { "Pair" }
///     fn module_path() -> Option<&'static str> { Some("workshop::parts") }
/// }
/// ```
///
/// [`type_path`]: TypePath::type_path
/// [`type_name`]: TypePath::type_name
/// [`type_ident`]: TypePath::type_ident
/// [`module_path`]: TypePath::module_path
pub trait TypePath: 'static {
    /// Returns the fully qualified path of the type, generics included.
    ///
    /// For `Vec<u32>` this is `"std::vec::Vec<u32>"`.
    fn type_path() -> &'static str;

    /// Returns the short name of the type, generics included.
    ///
    /// For `Vec<u32>` this is `"Vec<u32>"`.
    fn type_name() -> &'static str;

    /// Returns the short name of the type, without generics.
    ///
    /// For `Vec<u32>` this is `"Vec"`.
    fn type_ident() -> &'static str;

    /// Optional module path where the type is defined.
    ///
    /// Primitive built-in types return `None`.
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// DynamicTypePath

/// Dynamic dispatch over [`TypePath`].
///
/// Implemented for every `T: TypePath`, and object-safe, so the path of a
/// value behind `dyn Reflect` stays reachable.
///
/// # Examples
///
/// ```
/// use optic_reflect::{info::DynamicTypePath, Reflect};
///
/// let x = String::from("spoke");
/// let y: &dyn Reflect = &x;
/// assert_eq!(y.reflect_type_path(), "std::string::String");
/// ```
pub trait DynamicTypePath {
    /// See [`TypePath::type_path`].
    fn reflect_type_path(&self) -> &'static str;

    /// See [`TypePath::type_name`].
    fn reflect_type_name(&self) -> &'static str;

    /// See [`TypePath::type_ident`].
    fn reflect_type_ident(&self) -> &'static str;

    /// See [`TypePath::module_path`].
    fn reflect_module_path(&self) -> Option<&'static str>;
}

impl<T: TypePath> DynamicTypePath for T {
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        Self::type_path()
    }

    #[inline]
    fn reflect_type_name(&self) -> &'static str {
        Self::type_name()
    }

    #[inline]
    fn reflect_type_ident(&self) -> &'static str {
        Self::type_ident()
    }

    #[inline]
    fn reflect_module_path(&self) -> Option<&'static str> {
        Self::module_path()
    }
}

// -----------------------------------------------------------------------------
// TypePathTable

/// A lightweight vtable over one type's [`TypePath`] implementation.
///
/// Holds four function pointers, so path strings of rarely queried types
/// are never built eagerly.
///
/// # Examples
///
/// ```
/// use optic_reflect::info::TypePathTable;
///
/// let table = TypePathTable::of::<String>();
/// assert_eq!(table.path(), "std::string::String");
/// assert_eq!(table.ident(), "String");
/// ```
#[derive(Clone, Copy)]
pub struct TypePathTable {
    type_path: fn() -> &'static str,
    type_name: fn() -> &'static str,
    type_ident: fn() -> &'static str,
    module_path: fn() -> Option<&'static str>,
}

impl TypePathTable {
    /// Creates a new table from a type.
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            type_path: T::type_path,
            type_name: T::type_name,
            type_ident: T::type_ident,
            module_path: T::module_path,
        }
    }

    /// See [`TypePath::type_path`].
    #[inline(always)]
    pub fn path(&self) -> &'static str {
        (self.type_path)()
    }

    /// See [`TypePath::type_name`].
    #[inline(always)]
    pub fn name(&self) -> &'static str {
        (self.type_name)()
    }

    /// See [`TypePath::type_ident`].
    #[inline(always)]
    pub fn ident(&self) -> &'static str {
        (self.type_ident)()
    }

    /// See [`TypePath::module_path`].
    #[inline(always)]
    pub fn module_path(&self) -> Option<&'static str> {
        (self.module_path)()
    }
}

impl core::fmt::Debug for TypePathTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypePathTable")
            .field("type_path", &self.path())
            .field("type_name", &self.name())
            .field("type_ident", &self.ident())
            .field("module_path", &self.module_path())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Type

/// The base representation of a Rust type: a [`TypeId`] plus a
/// [`TypePathTable`].
///
/// # Examples
///
/// ```
/// # use core::any::TypeId;
/// use optic_reflect::info::Type;
///
/// let ty = Type::of::<String>();
///
/// assert!(ty.is::<String>());
/// assert_eq!(ty.id(), TypeId::of::<String>());
/// assert_eq!(ty.path(), "std::string::String");
/// ```
#[derive(Copy, Clone)]
pub struct Type {
    type_path_table: TypePathTable,
    type_id: TypeId,
}

impl Type {
    /// Creates a new [`Type`] from a type that implements [`TypePath`].
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            type_path_table: TypePathTable::of::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }

    /// Returns the [`TypeId`] of the type.
    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.type_id
    }

    /// Check if the given type matches this one, comparing [`TypeId`]s.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        TypeId::of::<T>() == self.type_id
    }

    /// Returns the [`TypePathTable`] of the type.
    #[inline(always)]
    pub const fn path_table(&self) -> TypePathTable {
        self.type_path_table
    }

    /// See [`TypePath::type_path`].
    #[inline]
    pub fn path(&self) -> &'static str {
        self.type_path_table.path()
    }

    /// See [`TypePath::type_name`].
    #[inline]
    pub fn name(&self) -> &'static str {
        self.type_path_table.name()
    }

    /// See [`TypePath::type_ident`].
    #[inline]
    pub fn ident(&self) -> &'static str {
        self.type_path_table.ident()
    }

    /// See [`TypePath::module_path`].
    #[inline]
    pub fn module_path(&self) -> Option<&'static str> {
        self.type_path_table.module_path()
    }
}

/// Relies purely on the [`TypeId`].
impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Type {}

/// Relies purely on the [`TypeId`].
impl core::hash::Hash for Type {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

/// Prints the type path only.
impl core::fmt::Debug for Type {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

macro_rules! impl_type_fn {
    ($field:ident) => {
        /// Returns the underlying [`Type`](crate::info::Type).
        #[inline(always)]
        pub const fn ty(&self) -> &$crate::info::Type {
            &self.$field
        }

        /// Returns the `TypeId`.
        #[inline]
        pub const fn ty_id(&self) -> ::core::any::TypeId {
            self.ty().id()
        }

        /// Check if the given type matches this one.
        #[inline]
        pub fn type_is<T: ::core::any::Any>(&self) -> bool {
            self.ty().id() == ::core::any::TypeId::of::<T>()
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
    };
}

pub(crate) use impl_type_fn;
