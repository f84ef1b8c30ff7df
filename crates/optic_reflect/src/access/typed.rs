use std::borrow::Cow;
use std::sync::{Arc, PoisonError, RwLock};

use core::any::{Any, TypeId};
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use optic_utils::hash::HashMap;
use optic_utils::hash::hashbrown::Equivalent;

use crate::Reflect;
use crate::access::build::{Getter, Setter, struct_info_of};
use crate::access::{AccessError, ObjectAccessor, Policy};
use crate::info::Typed;
use crate::ops::Struct;

// -----------------------------------------------------------------------------
// Cache keys

/// Owned cache key: folded property name plus the property type.
#[derive(PartialEq, Eq, Hash)]
struct TypedKey {
    name: String,
    ty: TypeId,
}

impl TypedKey {
    #[inline]
    fn new<P: 'static>(name: String) -> Self {
        Self {
            name,
            ty: TypeId::of::<P>(),
        }
    }
}

/// Borrowed probe key; hashes exactly like [`TypedKey`].
struct TypedKeyRef<'a> {
    name: &'a str,
    ty: TypeId,
}

impl<'a> TypedKeyRef<'a> {
    #[inline]
    fn new<P: 'static>(name: &'a str) -> Self {
        Self {
            name,
            ty: TypeId::of::<P>(),
        }
    }
}

impl Hash for TypedKeyRef<'_> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Field order matches the derived `TypedKey` hash.
        self.name.hash(state);
        self.ty.hash(state);
    }
}

impl Equivalent<TypedKey> for TypedKeyRef<'_> {
    #[inline]
    fn equivalent(&self, key: &TypedKey) -> bool {
        self.ty == key.ty && self.name == key.name
    }
}

// -----------------------------------------------------------------------------
// Cache slots

/// A memoized compilation outcome for one `(name, property type)` pair.
enum Slot {
    /// A compiled `Getter<T, P>` / `Setter<T, P>`, type-erased for storage.
    Ready(Box<dyn Any + Send + Sync>),
    /// The pair can never compile: wrong declared type, wrong direction, or
    /// an ambiguous fold. Remembered so repeat probes stay on the read path.
    Incompatible,
}

#[derive(Default)]
struct TypedCache {
    getters: HashMap<TypedKey, Slot>,
    setters: HashMap<TypedKey, Slot>,
}

// -----------------------------------------------------------------------------
// TypedAccessor

/// An accessor over `T` with a lazily compiled cache of monomorphized
/// entries, keyed by `(folded name, property type)`.
///
/// The typed surface is a pair of probes that never fail:
/// [`try_get`](Self::try_get) and [`try_set`](Self::try_set) flatten every
/// failure into `None` / `false`. The first probe of a pair compiles a
/// [`Getter`] / [`Setter`] and memoizes it; a pair that cannot compile is
/// memoized as incompatible so repeat probes answer from the cache either
/// way. Unknown names are the one exception: they are not remembered, since
/// arbitrary foreign strings would grow the cache without bound.
///
/// The type-erased surface of the underlying [`ObjectAccessor`] stays
/// available through [`get`](Self::get) / [`get_owned`](Self::get_owned) /
/// [`set`](Self::set), restricted to `&T` / `&mut T`.
///
/// Steady-state probes take the read lock only; a miss upgrades to the
/// write lock, re-checks, compiles once, and publishes. Distinct accessors
/// never contend.
///
/// # Examples
///
/// ```
/// use optic_reflect::access::TypedAccessor;
/// use optic_reflect::derive::Reflect;
///
/// #[derive(Reflect, Default)]
/// pub struct Turbine {
///     pub rpm: u32,
/// }
///
/// let access = TypedAccessor::<Turbine>::new();
/// let mut turbine = Turbine::default();
///
/// assert!(access.try_set(&mut turbine, "rpm", 4500_u32));
/// assert_eq!(access.try_get::<u32>(&turbine, "rpm"), Some(4500));
///
/// // Wrong property type: `None`, remembered, never an error.
/// assert_eq!(access.try_get::<i64>(&turbine, "rpm"), None);
/// ```
pub struct TypedAccessor<T> {
    object: Arc<ObjectAccessor>,
    cache: RwLock<TypedCache>,
    marker: PhantomData<fn(&T)>,
}

impl<T: Struct + Typed> TypedAccessor<T> {
    /// Builds an accessor for `T` under the default [`Policy`].
    #[inline]
    pub fn new() -> Self {
        Self::with_policy(Policy::new())
    }

    /// Builds an accessor for `T` under the given [`Policy`].
    pub fn with_policy(policy: Policy) -> Self {
        Self {
            object: Arc::new(ObjectAccessor::with_policy::<T>(policy)),
            cache: RwLock::new(TypedCache::default()),
            marker: PhantomData,
        }
    }

    /// Builds an accessor sharing an existing [`ObjectAccessor`].
    ///
    /// Fails with [`AccessError::TargetMismatch`] when the shared
    /// accessor's target is not `T`.
    pub fn from_object(object: Arc<ObjectAccessor>) -> Result<Self, AccessError> {
        if !object.target().is::<T>() {
            return Err(AccessError::TargetMismatch {
                expected: Cow::Borrowed(T::type_path()),
                received: Cow::Borrowed(object.target().path()),
            });
        }
        Ok(Self {
            object,
            cache: RwLock::new(TypedCache::default()),
            marker: PhantomData,
        })
    }

    /// The shared type-erased accessor underneath.
    #[inline]
    pub const fn object(&self) -> &Arc<ObjectAccessor> {
        &self.object
    }

    /// The policy this accessor was built under.
    #[inline]
    pub fn policy(&self) -> Policy {
        self.object.policy()
    }

    // -------------------------------------------------------------------------
    // Typed probes

    /// Reads a property as `P`, or `None`.
    ///
    /// `None` covers every failure: unknown name, hidden or write-only
    /// property, ambiguous fold, and a `P` that is not the declared type.
    /// Probes never panic and never allocate an error.
    pub fn try_get<P: Reflect + Typed + Clone>(&self, instance: &T, name: &str) -> Option<P> {
        let folded = self.object.policy().fold(name);
        let key = TypedKeyRef::new::<P>(folded.as_ref());

        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            match cache.getters.get(&key) {
                Some(Slot::Ready(entry)) => {
                    return Some(entry.downcast_ref::<Getter<T, P>>()?.get(instance));
                }
                Some(Slot::Incompatible) => return None,
                None => {}
            }
        }

        self.compile_getter::<P>(folded, instance)
    }

    /// Writes a property from `P`, reporting success.
    ///
    /// `false` covers every failure and leaves the target unchanged; the
    /// value is dropped. Probes never panic.
    pub fn try_set<P: Reflect + Typed>(&self, instance: &mut T, name: &str, value: P) -> bool {
        let folded = self.object.policy().fold(name);
        let key = TypedKeyRef::new::<P>(folded.as_ref());

        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            match cache.setters.get(&key) {
                Some(Slot::Ready(entry)) => {
                    return match entry.downcast_ref::<Setter<T, P>>() {
                        Some(setter) => {
                            setter.set(instance, value);
                            true
                        }
                        None => false,
                    };
                }
                Some(Slot::Incompatible) => return false,
                None => {}
            }
        }

        self.compile_setter::<P>(folded, instance, value)
    }

    /// Compiles, publishes, and answers a getter miss.
    #[inline(never)]
    fn compile_getter<P: Reflect + Typed + Clone>(
        &self,
        folded: Cow<'_, str>,
        instance: &T,
    ) -> Option<P> {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);

        // Re-check: another thread may have compiled this pair first.
        match cache.getters.get(&TypedKeyRef::new::<P>(folded.as_ref())) {
            Some(Slot::Ready(entry)) => {
                return Some(entry.downcast_ref::<Getter<T, P>>()?.get(instance));
            }
            Some(Slot::Incompatible) => return None,
            None => {}
        }

        match self.object.snapshot().resolve_at(folded.as_ref()) {
            Ok((index, _)) => match Getter::<T, P>::for_property(struct_info_of::<T>(), index) {
                Ok(getter) => {
                    let value = getter.get(instance);
                    cache
                        .getters
                        .insert(TypedKey::new::<P>(folded.into_owned()), Slot::Ready(Box::new(getter)));
                    Some(value)
                }
                Err(_) => {
                    // Wrong direction or declared type: permanent for this pair.
                    cache
                        .getters
                        .insert(TypedKey::new::<P>(folded.into_owned()), Slot::Incompatible);
                    None
                }
            },
            Err(AccessError::Ambiguous { .. }) => {
                cache
                    .getters
                    .insert(TypedKey::new::<P>(folded.into_owned()), Slot::Incompatible);
                None
            }
            // Unknown names are not memoized.
            Err(_) => None,
        }
    }

    /// Compiles, publishes, and answers a setter miss.
    #[inline(never)]
    fn compile_setter<P: Reflect + Typed>(
        &self,
        folded: Cow<'_, str>,
        instance: &mut T,
        value: P,
    ) -> bool {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);

        match cache.setters.get(&TypedKeyRef::new::<P>(folded.as_ref())) {
            Some(Slot::Ready(entry)) => {
                return match entry.downcast_ref::<Setter<T, P>>() {
                    Some(setter) => {
                        setter.set(instance, value);
                        true
                    }
                    None => false,
                };
            }
            Some(Slot::Incompatible) => return false,
            None => {}
        }

        match self.object.snapshot().resolve_at(folded.as_ref()) {
            Ok((index, _)) => match Setter::<T, P>::for_property(struct_info_of::<T>(), index) {
                Ok(setter) => {
                    setter.set(instance, value);
                    cache
                        .setters
                        .insert(TypedKey::new::<P>(folded.into_owned()), Slot::Ready(Box::new(setter)));
                    true
                }
                Err(_) => {
                    cache
                        .setters
                        .insert(TypedKey::new::<P>(folded.into_owned()), Slot::Incompatible);
                    false
                }
            },
            Err(AccessError::Ambiguous { .. }) => {
                cache
                    .setters
                    .insert(TypedKey::new::<P>(folded.into_owned()), Slot::Incompatible);
                false
            }
            Err(_) => false,
        }
    }

    // -------------------------------------------------------------------------
    // Type-erased surface, restricted to `T`

    /// Reads a property as a borrow. See [`ObjectAccessor::get`].
    #[inline]
    pub fn get<'a>(&self, instance: &'a T, name: &str) -> Result<&'a dyn Reflect, AccessError> {
        self.object.get(instance, name)
    }

    /// Reads a property into a disconnected box. See
    /// [`ObjectAccessor::get_owned`].
    #[inline]
    pub fn get_owned(&self, instance: &T, name: &str) -> Result<Box<dyn Reflect>, AccessError> {
        self.object.get_owned(instance, name)
    }

    /// Writes a property. See [`ObjectAccessor::set`].
    #[inline]
    pub fn set(
        &self,
        instance: &mut T,
        name: &str,
        value: Box<dyn Reflect>,
    ) -> Result<(), AccessError> {
        self.object.set(instance, name, value)
    }
}

impl<T: Struct + Typed> Default for TypedAccessor<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> core::fmt::Debug for TypedAccessor<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("TypedAccessor")
            .field("target", self.object.target())
            .field("getters", &cache.getters.len())
            .field("setters", &cache.setters.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::Reflect;

    #[derive(Reflect, Default)]
    pub struct Pump {
        pub rate: f64,
        pub label: String,
        #[reflect(read_only)]
        pub serial: u64,
        #[reflect(write_only)]
        pub command: String,
    }

    #[test]
    fn probe_round_trip() {
        let access = TypedAccessor::<Pump>::new();
        let mut pump = Pump::default();

        assert!(access.try_set(&mut pump, "rate", 2.5_f64));
        assert_eq!(access.try_get::<f64>(&pump, "rate"), Some(2.5));

        // Repeat probes answer from the cache.
        assert!(access.try_set(&mut pump, "rate", 3.5_f64));
        assert_eq!(access.try_get::<f64>(&pump, "rate"), Some(3.5));
        assert_eq!(pump.rate, 3.5);
    }

    #[test]
    fn probes_never_error() {
        let access = TypedAccessor::<Pump>::new();
        let mut pump = Pump::default();
        pump.rate = 1.25;

        // Unknown name.
        assert_eq!(access.try_get::<f64>(&pump, "pressure"), None);
        assert!(!access.try_set(&mut pump, "pressure", 9.0_f64));

        // Wrong property type, twice: the second probe hits the memo.
        assert_eq!(access.try_get::<u32>(&pump, "rate"), None);
        assert_eq!(access.try_get::<u32>(&pump, "rate"), None);
        assert!(!access.try_set(&mut pump, "rate", 7_u32));

        // The incompatible memo is per property type: the declared type
        // still resolves.
        assert_eq!(access.try_get::<f64>(&pump, "rate"), Some(1.25));
        assert_eq!(pump.rate, 1.25);
    }

    #[test]
    fn probes_respect_direction() {
        let access = TypedAccessor::<Pump>::new();
        let mut pump = Pump::default();

        // Write-only: settable, not gettable.
        assert!(access.try_set(&mut pump, "command", String::from("purge")));
        assert_eq!(pump.command, "purge");
        assert_eq!(access.try_get::<String>(&pump, "command"), None);

        // Read-only: gettable, not settable.
        assert_eq!(access.try_get::<u64>(&pump, "serial"), Some(0));
        assert!(!access.try_set(&mut pump, "serial", 5_u64));
        assert_eq!(pump.serial, 0);
    }

    #[test]
    fn case_insensitive_probes_share_slots() {
        let access = TypedAccessor::<Pump>::with_policy(Policy::new().ignore_case());
        let mut pump = Pump::default();

        assert!(access.try_set(&mut pump, "RATE", 4.5_f64));
        assert_eq!(access.try_get::<f64>(&pump, "Rate"), Some(4.5));
    }

    #[test]
    fn erased_surface_is_restricted_to_the_target() {
        let access = TypedAccessor::<Pump>::new();
        let mut pump = Pump::default();

        access
            .set(&mut pump, "label", Box::new(String::from("aft")))
            .unwrap();
        let label = access.get(&pump, "label").unwrap();
        assert_eq!(label.downcast_ref::<String>().unwrap(), "aft");
    }

    #[test]
    fn shared_object_accessor_must_match() {
        #[derive(Reflect, Default)]
        pub struct Valve {
            pub open: bool,
        }

        let shared = Arc::new(ObjectAccessor::of::<Valve>());
        assert!(TypedAccessor::<Valve>::from_object(Arc::clone(&shared)).is_ok());
        assert!(matches!(
            TypedAccessor::<Pump>::from_object(shared),
            Err(AccessError::TargetMismatch { .. })
        ));
    }

    #[test]
    fn accessors_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<TypedAccessor<Pump>>();
    }
}
