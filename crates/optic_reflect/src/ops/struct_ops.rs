use core::any::Any;

use crate::Reflect;

// -----------------------------------------------------------------------------
// Struct

/// Dynamic property access on a struct-kind value.
///
/// These are the raw operations every accessor entry binds to: lookup by
/// name for the generic path, lookup by index for entries that resolved
/// the name once at build time.
///
/// # Contract
///
/// Implementations must stay consistent with the type's
/// [`StructInfo`](crate::info::StructInfo):
///
/// - indices follow the descriptor order, `property_len` matches;
/// - `property`/`property_at` return `Some` exactly for readable
///   properties, `property_mut`/`property_at_mut` exactly for writable
///   ones;
/// - a write-only property therefore answers only the `_mut` lookups,
///   and a read-only property only the shared ones.
///
/// [`#[derive(Reflect)]`](crate::derive::Reflect) upholds all of this;
/// manual implementations carry the burden themselves.
///
/// # Examples
///
/// ```
/// use optic_reflect::derive::Reflect;
/// use optic_reflect::ops::Struct;
///
/// #[derive(Reflect)]
/// pub struct Valve {
///     pub open: bool,
///     pub label: String,
/// }
///
/// let valve = Valve { open: true, label: "intake".into() };
/// assert_eq!(valve.property_len(), 2);
/// assert_eq!(valve.name_at(1), Some("label"));
///
/// let open = valve.property("open").unwrap();
/// assert_eq!(open.downcast_ref::<bool>(), Some(&true));
/// ```
pub trait Struct: Reflect {
    /// Returns the readable property with the given name.
    fn property(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns the writable property with the given name.
    fn property_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    /// Returns the readable property at the given descriptor index.
    fn property_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the writable property at the given descriptor index.
    fn property_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the name of the property at the given descriptor index.
    fn name_at(&self, index: usize) -> Option<&str>;

    /// The number of property descriptors.
    fn property_len(&self) -> usize;

    /// Iterates the readable properties with their names.
    fn iter_properties(&self) -> PropertyIter<'_>;
}

// -----------------------------------------------------------------------------
// dyn Struct

impl dyn Struct {
    /// Returns the property with the given name, downcast to `T`.
    ///
    /// `None` covers all misses: unknown name, unreadable property, or a
    /// value of a different type.
    #[inline]
    pub fn property_as<T: Any>(&self, name: &str) -> Option<&T> {
        self.property(name)?.downcast_ref::<T>()
    }

    /// Returns the mutable property with the given name, downcast to `T`.
    #[inline]
    pub fn property_mut_as<T: Any>(&mut self, name: &str) -> Option<&mut T> {
        self.property_mut(name)?.downcast_mut::<T>()
    }
}

// -----------------------------------------------------------------------------
// PropertyIter

/// Iterator over a struct's readable properties.
///
/// Yields `(name, value)` pairs in descriptor order; write-only slots are
/// skipped because they have nothing to yield.
pub struct PropertyIter<'a> {
    target: &'a dyn Struct,
    index: usize,
}

impl<'a> PropertyIter<'a> {
    /// Creates a new iterator over `target`'s readable properties.
    #[inline]
    pub fn new(target: &'a dyn Struct) -> Self {
        Self { target, index: 0 }
    }
}

impl<'a> Iterator for PropertyIter<'a> {
    type Item = (&'a str, &'a dyn Reflect);

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.target.property_len() {
            let index = self.index;
            self.index += 1;
            if let Some(value) = self.target.property_at(index) {
                let name = self.target.name_at(index)?;
                return Some((name, value));
            }
        }
        None
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.target.property_len().saturating_sub(self.index);
        (0, Some(remaining))
    }
}
