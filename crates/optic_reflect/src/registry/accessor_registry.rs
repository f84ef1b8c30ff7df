use core::any::TypeId;

use std::sync::{Arc, PoisonError};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use optic_utils::hash::{FixedHashState, HashMap, HashSet};

use crate::access::{ObjectAccessor, Policy};
use crate::info::{Type, Typed};
use crate::ops::Struct;

// -----------------------------------------------------------------------------
// AccessorRegistry

/// A registry of shared [`ObjectAccessor`]s.
///
/// This struct is used as the central store for accessors. [Building] a
/// target type's accessor creates one entry per `(target, [`Policy`])`
/// pair and hands it out as an [`Arc`], so every caller shares the same
/// eager table instead of rebuilding it.
///
/// Targets are additionally indexed by full type path and by short type
/// name. A short name claimed by several targets becomes ambiguous and
/// stops resolving; full paths always resolve.
///
/// # Example
///
/// ```
/// use optic_reflect::access::Policy;
/// use optic_reflect::derive::Reflect;
/// use optic_reflect::registry::AccessorRegistry;
///
/// #[derive(Reflect)]
/// pub struct Rotor {
///     pub blades: u8,
/// }
///
/// let mut registry = AccessorRegistry::new();
/// let access = registry.get_or_build::<Rotor>(Policy::new());
///
/// let rotor = Rotor { blades: 5 };
/// let blades = access.get(&rotor, "blades").unwrap();
/// assert_eq!(blades.downcast_ref::<u8>(), Some(&5));
///
/// // Registered targets resolve by short name.
/// let found = registry.get_with_type_name("Rotor", Policy::new()).unwrap();
/// assert!(found.target().is::<Rotor>());
/// ```
///
/// [Building]: AccessorRegistry::get_or_build
pub struct AccessorRegistry {
    accessor_table: HashMap<(TypeId, Policy), Arc<ObjectAccessor>>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for AccessorRegistry {
    /// See [`AccessorRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl AccessorRegistry {
    /// Create an empty [`AccessorRegistry`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            accessor_table: HashMap::with_hasher(FixedHashState),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
            type_name_to_id: HashMap::with_hasher(FixedHashState),
            ambiguous_names: HashSet::with_hasher(FixedHashState),
        }
    }

    /// Create a registry pre-populated with every auto-registered type.
    ///
    /// Collects the registrations submitted by
    /// `#[reflect(auto_register)]` derives; see
    /// [`auto_register`](Self::auto_register). With the `auto_register`
    /// feature disabled, or on platforms without static registration
    /// support, the result is simply empty.
    pub fn with_registered() -> Self {
        let mut registry = Self::new();
        registry.auto_register();
        registry
    }

    // # Validity
    // The target must **not** already be indexed.
    fn add_new_type_indices(
        target: &Type,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
        type_name_to_id: &mut HashMap<&'static str, TypeId>,
        ambiguous_names: &mut HashSet<&'static str>,
    ) {
        let type_name = target.name();

        // Check for duplicate short names.
        if !ambiguous_names.contains(type_name) {
            if type_name_to_id.contains_key(type_name) {
                type_name_to_id.remove(type_name);
                ambiguous_names.insert(type_name);
            } else {
                type_name_to_id.insert(type_name, target.id());
            }
        }

        // Full paths are assumed unique.
        type_path_to_id.insert(target.path(), target.id());
    }

    /// Returns the accessor for `T` under `policy`, building it on the
    /// first request.
    ///
    /// The first request for a target under any policy also indexes the
    /// target's type path and short type name. Building the same target
    /// under a second policy creates a second accessor but does not
    /// re-index the name, so a target never collides with itself.
    pub fn get_or_build<T: Struct + Typed>(&mut self, policy: Policy) -> Arc<ObjectAccessor> {
        let key = (TypeId::of::<T>(), policy);
        if let Some(found) = self.accessor_table.get(&key) {
            return Arc::clone(found);
        }

        let accessor = Arc::new(ObjectAccessor::with_policy::<T>(policy));
        let target = *accessor.target();
        if !self.type_path_to_id.contains_key(target.path()) {
            Self::add_new_type_indices(
                &target,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
        }
        self.accessor_table.insert(key, Arc::clone(&accessor));
        accessor
    }

    /// Registers the type `T` under the default [`Policy`] if it has not
    /// been registered already.
    #[inline]
    pub fn register<T: Struct + Typed>(&mut self) {
        self.get_or_build::<T>(Policy::new());
    }

    /// Automatically registers all types annotated with
    /// `#[reflect(auto_register)]`.
    ///
    /// This method is equivalent to calling [`register`](Self::register)
    /// for each annotated type. Repeated calls are cheap and will not
    /// insert duplicates.
    ///
    /// ## Return Value
    ///
    /// Returns `true` if automatic registration succeeded on the current
    /// platform; otherwise, `false`. Successful registrations remain
    /// `true` on subsequent calls, allowing you to detect platform
    /// support.
    ///
    /// ## Feature Dependency
    ///
    /// This method requires the `auto_register` feature. When disabled,
    /// it always does nothing and returns `false`.
    ///
    /// ## Platform Support
    ///
    /// Static registration is backed by the `inventory` crate, which
    /// supports Linux, macOS, Windows, iOS, Android, and Web. On other
    /// platforms this method becomes a no-op.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use core::any::TypeId;
    /// # use optic_reflect::access::Policy;
    /// # use optic_reflect::derive::Reflect;
    /// # use optic_reflect::registry::AccessorRegistry;
    /// #[derive(Reflect)]
    /// #[reflect(auto_register)]
    /// struct Dial {
    ///     pub setting: u8,
    /// }
    ///
    /// let mut registry = AccessorRegistry::new();
    /// let successful = registry.auto_register();
    ///
    /// assert!(successful);
    /// assert!(registry.contains(TypeId::of::<Dial>(), Policy::new()));
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(not(feature = "auto_register"))]
        {
            return false;
        }

        #[cfg(feature = "auto_register")]
        {
            use crate::registry::auto_register;

            // Reduce the cost of duplicate registrations.
            if self.contains(TypeId::of::<auto_register::AvailFlag>(), Policy::new()) {
                return true;
            }
            auto_register::register_collected(self);
            self.contains(TypeId::of::<auto_register::AvailFlag>(), Policy::new())
        }
    }

    /// Whether an accessor for the `(type, policy)` pair has been built.
    #[inline]
    pub fn contains(&self, type_id: TypeId, policy: Policy) -> bool {
        self.accessor_table.contains_key(&(type_id, policy))
    }

    /// Returns the accessor for the type with the given [`TypeId`] under
    /// `policy`.
    ///
    /// If the pair has not been built, returns `None`.
    #[inline]
    pub fn get(&self, type_id: TypeId, policy: Policy) -> Option<&Arc<ObjectAccessor>> {
        self.accessor_table.get(&(type_id, policy))
    }

    /// Returns the accessor for the type with the given [type path]
    /// under `policy`.
    ///
    /// If no type with the given path has been registered, or the pair
    /// has not been built, returns `None`.
    ///
    /// [type path]: crate::info::TypePath::type_path
    pub fn get_with_type_path(&self, type_path: &str, policy: Policy) -> Option<&Arc<ObjectAccessor>> {
        // Manual inline
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id, policy),
            None => None,
        }
    }

    /// Returns the accessor for the type with the given [type name]
    /// under `policy`.
    ///
    /// If the type name is ambiguous, or if no type with the given name
    /// has been registered, or the pair has not been built, returns
    /// `None`.
    ///
    /// [type name]: crate::info::TypePath::type_name
    pub fn get_with_type_name(&self, type_name: &str, policy: Policy) -> Option<&Arc<ObjectAccessor>> {
        // Manual inline
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get(*id, policy),
            None => None,
        }
    }

    /// Returns `true` if the given [type name] is ambiguous, that is, it
    /// matches multiple registered types.
    ///
    /// # Example
    /// ```
    /// # use optic_reflect::registry::AccessorRegistry;
    /// # mod foo {
    /// #     use optic_reflect::derive::Reflect;
    /// #     #[derive(Reflect)]
    /// #     pub struct MyType {
    /// #         pub n: u32,
    /// #     }
    /// # }
    /// # mod bar {
    /// #     use optic_reflect::derive::Reflect;
    /// #     #[derive(Reflect)]
    /// #     pub struct MyType {
    /// #         pub n: u32,
    /// #     }
    /// # }
    /// let mut registry = AccessorRegistry::new();
    /// registry.register::<foo::MyType>();
    /// registry.register::<bar::MyType>();
    /// assert_eq!(registry.is_ambiguous("MyType"), true);
    /// ```
    ///
    /// [type name]: crate::info::TypePath::type_name
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Returns an iterator over the built accessors.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Arc<ObjectAccessor>> {
        self.accessor_table.values()
    }
}

// -----------------------------------------------------------------------------
// AccessorRegistryArc

#[derive(Clone, Default)]
pub struct AccessorRegistryArc {
    /// The wrapped [`AccessorRegistry`].
    pub internal: Arc<RwLock<AccessorRegistry>>,
}

impl AccessorRegistryArc {
    /// Takes a read lock on the underlying [`AccessorRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, AccessorRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`AccessorRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, AccessorRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for AccessorRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.internal
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .type_path_to_id
            .keys()
            .fmt(f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::Reflect;

    #[derive(Reflect)]
    pub struct Gear {
        pub teeth: u32,
    }

    mod left {
        use crate::derive::Reflect;

        #[derive(Reflect)]
        pub struct Relay {
            pub channel: u8,
        }
    }

    mod right {
        use crate::derive::Reflect;

        #[derive(Reflect)]
        pub struct Relay {
            pub channel: u8,
        }
    }

    #[test]
    fn accessors_are_built_once_per_policy() {
        let mut registry = AccessorRegistry::new();

        let first = registry.get_or_build::<Gear>(Policy::new());
        let second = registry.get_or_build::<Gear>(Policy::new());
        assert!(Arc::ptr_eq(&first, &second));

        let folded = registry.get_or_build::<Gear>(Policy::new().ignore_case());
        assert!(!Arc::ptr_eq(&first, &folded));
        assert_eq!(registry.iter().len(), 2);
    }

    #[test]
    fn names_resolve_after_registration() {
        let mut registry = AccessorRegistry::new();
        registry.register::<Gear>();

        assert!(registry.contains(TypeId::of::<Gear>(), Policy::new()));
        let found = registry.get_with_type_name("Gear", Policy::new()).unwrap();
        assert!(found.target().is::<Gear>());

        // Unknown names and unbuilt policies stay empty.
        assert!(registry.get_with_type_name("Sprocket", Policy::new()).is_none());
        assert!(
            registry
                .get_with_type_name("Gear", Policy::new().ignore_case())
                .is_none()
        );
    }

    #[test]
    fn full_paths_survive_name_collisions() {
        let mut registry = AccessorRegistry::new();
        registry.register::<left::Relay>();
        registry.register::<right::Relay>();

        assert!(registry.is_ambiguous("Relay"));
        assert!(registry.get_with_type_name("Relay", Policy::new()).is_none());

        let path = <left::Relay as crate::info::TypePath>::type_path();
        let found = registry.get_with_type_path(path, Policy::new()).unwrap();
        assert!(found.target().is::<left::Relay>());
    }

    #[test]
    fn one_type_under_two_policies_is_not_ambiguous() {
        let mut registry = AccessorRegistry::new();
        registry.get_or_build::<Gear>(Policy::new());
        registry.get_or_build::<Gear>(Policy::new().include_non_public());

        assert!(!registry.is_ambiguous("Gear"));
        assert!(registry.get_with_type_name("Gear", Policy::new()).is_some());
    }

    #[test]
    fn shared_registries_observe_writes() {
        let shared = AccessorRegistryArc::default();
        let clone = shared.clone();

        shared.write().register::<Gear>();
        assert!(clone.read().get_with_type_name("Gear", Policy::new()).is_some());
    }
}
