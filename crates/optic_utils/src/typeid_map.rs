use core::any::TypeId;
use core::fmt;

use crate::hash::NoOpHashState;
use crate::hash::hashbrown::HashMap;
use crate::hash::hashbrown::hash_map::Entry;

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map container fixed to [`TypeId`] keys.
///
/// `TypeId` is already a high-entropy value, so the map skips rehashing
/// entirely by pairing [`HashMap`] with [`NoOpHashState`].
///
/// The interface hides the backing container, keeping room to change the
/// implementation without breaking callers.
pub struct TypeIdMap<V>(HashMap<TypeId, V, NoOpHashState>);

impl<V> TypeIdMap<V> {
    /// Creates an empty `TypeIdMap`.
    ///
    /// # Examples
    ///
    /// ```
    /// use optic_utils::TypeIdMap;
    /// let map = TypeIdMap::<u8>::new();
    /// assert!(map.is_empty());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(NoOpHashState))
    }

    /// Creates an empty `TypeIdMap` holding at least `capacity` entries
    /// without reallocating.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(HashMap::with_capacity_and_hasher(capacity, NoOpHashState))
    }

    /// Returns a reference to the value stored for `type_id`.
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    /// Returns a reference to the value stored for the type `T`.
    #[inline(always)]
    pub fn get_type<T: ?Sized + 'static>(&self) -> Option<&V> {
        self.get(&TypeId::of::<T>())
    }

    /// Returns a mutable reference to the value stored for `type_id`.
    pub fn get_mut(&mut self, type_id: &TypeId) -> Option<&mut V> {
        self.0.get_mut(type_id)
    }

    /// Returns a mutable reference to the value stored for the type `T`.
    #[inline(always)]
    pub fn get_mut_type<T: ?Sized + 'static>(&mut self) -> Option<&mut V> {
        self.get_mut(&TypeId::of::<T>())
    }

    /// Gets the value for `type_id`, inserting the result of `f` first if
    /// the key is vacant.
    ///
    /// `f` runs only on the vacant path.
    #[inline]
    pub fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(type_id) {
            Entry::Vacant(entry) => entry.insert(f()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    /// Inserts a key-value pair, returning the previous value if any.
    pub fn insert(&mut self, type_id: TypeId, value: V) -> Option<V> {
        self.0.insert(type_id, value)
    }

    /// Inserts a value for the type `T`, returning the previous value if any.
    #[inline(always)]
    pub fn insert_type<T: ?Sized + 'static>(&mut self, value: V) -> Option<V> {
        self.insert(TypeId::of::<T>(), value)
    }

    /// Returns `true` if the map holds a value for `type_id`.
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    /// Returns `true` if the map holds a value for the type `T`.
    #[inline(always)]
    pub fn contains_type<T: ?Sized + 'static>(&self) -> bool {
        self.contains(&TypeId::of::<T>())
    }

    /// Returns the number of entries in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Clears the map, keeping the allocated memory for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Visits all key-value pairs in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&TypeId, &V)> {
        self.0.iter()
    }

    /// Visits all values in arbitrary order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.0.values()
    }

    /// Visits all keys in arbitrary order.
    #[inline]
    pub fn types(&self) -> impl ExactSizeIterator<Item = &TypeId> {
        self.0.keys()
    }
}

// -----------------------------------------------------------------------------
// Traits

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_helpers_share_one_slot() {
        let mut map = TypeIdMap::new();
        assert!(map.insert_type::<String>(1).is_none());
        assert_eq!(map.insert_type::<String>(2), Some(1));
        assert_eq!(map.get_type::<String>(), Some(&2));
        assert!(map.get_type::<u8>().is_none());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn get_or_insert_runs_once() {
        let mut map = TypeIdMap::new();
        let id = TypeId::of::<u64>();
        assert_eq!(*map.get_or_insert(id, || 7), 7);
        assert_eq!(*map.get_or_insert(id, || unreachable!()), 7);
    }
}
