//! Containers for static storage of type information.
//!
//! These are usually used to implement [`Typed`] and [`TypePath`].
//!
//! For non-generic types there is [`NonGenericTypeInfoCell`], a thin wrapper
//! around [`OnceLock<T>`] with almost no additional expense. There is no
//! `NonGenericTypePathCell` because a static string literal already covers
//! that case.
//!
//! For generic types the `static CELL` inside a function is shared by every
//! monomorphization, so one slot is not enough. [`GenericTypeInfoCell`] and
//! [`GenericTypePathCell`] keep a [`TypeIdMap`] behind a [`RwLock`] and hand
//! out one leaked entry per concrete type.
//!
//! [`Typed`]: crate::info::Typed
//! [`TypePath`]: crate::info::TypePath

use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use optic_utils::TypeIdMap;

use crate::info::TypeInfo;

mod sealed {
    use super::TypeInfo;

    pub trait TypedProperty: 'static {}

    impl TypedProperty for String {}
    impl TypedProperty for TypeInfo {}
}

use sealed::TypedProperty;

// -----------------------------------------------------------------------------
// NonGenericTypeCell

/// Container for static storage of non-generic type information.
///
/// Internally, there is an [`OnceLock<T>`], almost no additional expense.
///
/// See [`NonGenericTypeInfoCell`] for the common instantiation.
pub struct NonGenericTypeCell<T: TypedProperty>(OnceLock<T>);

/// Static storage of [`TypeInfo`] for a non-generic type.
///
/// # Example
///
/// ```
/// use optic_reflect::impls::NonGenericTypeInfoCell;
/// use optic_reflect::info::{PropertyInfo, StructInfo, TypeInfo, TypePath, Typed};
///
/// struct Pump {
///     pressure: f64,
/// }
///
/// impl TypePath for Pump {
///     fn type_path() -> &'static str { "plant::Pump" }
///     fn type_name() -> &'static str { "Pump" }
///     fn type_ident() -> &'static str { "Pump" }
///     fn module_path() -> Option<&'static str> { Some("plant") }
/// }
///
/// impl Typed for Pump {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| {
///             TypeInfo::Struct(StructInfo::new::<Pump>(vec![
///                 PropertyInfo::new::<f64>("pressure"),
///             ]))
///         })
///     }
/// }
///
/// let info = Pump::type_info().as_struct().unwrap();
/// assert_eq!(info.property("pressure").unwrap().type_path(), "f64");
/// ```
pub type NonGenericTypeInfoCell = NonGenericTypeCell<TypeInfo>;

impl<T: TypedProperty> NonGenericTypeCell<T> {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns a reference to the value stored in the cell.
    ///
    /// If the cell is still empty, it is filled from the given function first.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.0.get_or_init(f)
    }
}

impl<T: TypedProperty> Default for NonGenericTypeCell<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// GenericTypeCell

/// Container for static storage of type information with generics.
///
/// The `static CELL` in a generic function is shared by every concrete
/// instantiation, therefore the interior is a [`TypeIdMap`] guarded by a
/// [`RwLock`], with one leaked `&'static T` per entry.
///
/// See [`GenericTypeInfoCell`] and [`GenericTypePathCell`] for the common
/// instantiations.
pub struct GenericTypeCell<T: TypedProperty>(RwLock<TypeIdMap<&'static T>>);

/// Static storage of [`TypeInfo`] for a generic type.
///
/// # Example
///
/// ```
/// use optic_reflect::impls::GenericTypeInfoCell;
/// use optic_reflect::info::{PropertyInfo, StructInfo, TypeInfo, TypePath, Typed};
/// # use optic_reflect::impls::{concat, GenericTypePathCell};
///
/// struct Tagged<T> {
///     value: T,
/// }
/// # impl<T: TypePath> TypePath for Tagged<T> {
/// #     fn type_path() -> &'static str {
/// #         static CELL: GenericTypePathCell = GenericTypePathCell::new();
/// #         CELL.get_or_insert::<Self>(|| concat(&["plant::Tagged", "<", T::type_path(), ">"]))
/// #     }
/// #     fn type_name() -> &'static str {
/// #         static CELL: GenericTypePathCell = GenericTypePathCell::new();
/// #         CELL.get_or_insert::<Self>(|| concat(&["Tagged", "<", T::type_name(), ">"]))
/// #     }
/// #     fn type_ident() -> &'static str { "Tagged" }
/// #     fn module_path() -> Option<&'static str> { Some("plant") }
/// # }
///
/// impl<T: TypePath + Typed> Typed for Tagged<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(|| {
///             TypeInfo::Struct(StructInfo::new::<Self>(vec![
///                 PropertyInfo::new::<T>("value"),
///             ]))
///         })
///     }
/// }
///
/// let info = <Tagged<u32>>::type_info().as_struct().unwrap();
/// assert_eq!(info.property("value").unwrap().type_path(), "u32");
/// assert_eq!(<Tagged<bool>>::type_info().type_name(), "Tagged<bool>");
/// ```
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// Static storage of type path strings for a generic type.
///
/// # Example
///
/// ```
/// use optic_reflect::impls::{concat, GenericTypePathCell};
/// use optic_reflect::info::TypePath;
///
/// struct Slot<T>(T);
///
/// impl<T: TypePath> TypePath for Slot<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["plant::Slot", "<", T::type_path(), ">"]))
///     }
///     fn type_name() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["Slot", "<", T::type_name(), ">"]))
///     }
///     fn type_ident() -> &'static str { "Slot" }
///     fn module_path() -> Option<&'static str> { Some("plant") }
/// }
///
/// assert_eq!(<Slot<i32>>::type_path(), "plant::Slot<i32>");
/// assert_eq!(<Slot<u8>>::type_name(), "Slot<u8>");
/// ```
pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: TypedProperty> GenericTypeCell<T> {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns a reference to the value stored for the given type `G`.
    ///
    /// If there is no entry yet, a new one is generated from the given
    /// function and leaked into the cell.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> T) -> &T {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: T) -> &T {
        let mut map = self.0.write().unwrap_or_else(PoisonError::into_inner);
        // Copies the leaked `&'static T` out so the guard can drop.
        *map.get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}

impl<T: TypedProperty> Default for GenericTypeCell<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
