use std::borrow::Cow;

use optic_utils::hash::HashMap;

use crate::Reflect;
use crate::access::build::{WeakGetter, WeakSetter};
use crate::access::{AccessError, Policy, PropertySnapshot};
use crate::info::{KindError, PropertyInfo, Type, TypeInfo, Typed};
use crate::ops::Struct;

/// A name-indexed accessor over one struct type, built eagerly.
///
/// Construction takes a [`PropertySnapshot`] and builds one [`WeakGetter`]
/// per readable property and one [`WeakSetter`] per writable property,
/// keyed by the policy-folded name. After that the accessor never changes;
/// it is `Send + Sync` and meant to be built once per type and shared.
///
/// Reads and writes are type-erased: values travel as `&dyn Reflect` /
/// `Box<dyn Reflect>`. For monomorphized entries over a concrete type, see
/// [`TypedAccessor`](crate::access::TypedAccessor).
///
/// # Failure shape
///
/// Instances are checked against the accessor's target first; a foreign
/// instance fails [`TargetMismatch`]. A name that is unknown, hidden by the
/// policy, or points the wrong way fails [`NotReadable`] / [`NotWritable`]
/// naming the instance's runtime type and the property — the accessor does
/// not distinguish "no such property" from "property cannot be read" at
/// this surface.
///
/// # Examples
///
/// ```
/// use optic_reflect::access::ObjectAccessor;
/// use optic_reflect::derive::Reflect;
///
/// #[derive(Reflect, Default)]
/// pub struct Relay {
///     pub channel: u16,
///     pub armed: bool,
/// }
///
/// let access = ObjectAccessor::of::<Relay>();
///
/// let mut relay = Relay::default();
/// access.set(&mut relay, "channel", Box::new(12_u16)).unwrap();
///
/// let channel = access.get(&relay, "channel").unwrap();
/// assert_eq!(channel.downcast_ref::<u16>(), Some(&12));
/// ```
///
/// [`TargetMismatch`]: AccessError::TargetMismatch
/// [`NotReadable`]: AccessError::NotReadable
/// [`NotWritable`]: AccessError::NotWritable
pub struct ObjectAccessor {
    snapshot: PropertySnapshot,
    getters: HashMap<Cow<'static, str>, WeakGetter>,
    setters: HashMap<Cow<'static, str>, WeakSetter>,
}

impl ObjectAccessor {
    /// Builds an accessor for `T` under the default [`Policy`].
    #[inline]
    pub fn of<T: Struct + Typed>() -> Self {
        Self::with_policy::<T>(Policy::new())
    }

    /// Builds an accessor for `T` under the given [`Policy`].
    #[inline]
    pub fn with_policy<T: Struct + Typed>(policy: Policy) -> Self {
        Self::from_snapshot(PropertySnapshot::of::<T>(policy))
    }

    /// Builds an accessor from type information.
    ///
    /// Fails when the information does not describe a struct.
    pub fn from_info(info: &'static TypeInfo, policy: Policy) -> Result<Self, KindError> {
        Ok(Self::from_snapshot(PropertySnapshot::from_info(info, policy)?))
    }

    /// Builds an accessor from an instance's runtime type information.
    pub fn from_instance(instance: &dyn Reflect, policy: Policy) -> Result<Self, KindError> {
        Ok(Self::from_snapshot(PropertySnapshot::from_instance(
            instance, policy,
        )?))
    }

    /// Builds an accessor over an existing snapshot.
    ///
    /// Both entry caches observe exactly the snapshot's property set.
    pub fn from_snapshot(snapshot: PropertySnapshot) -> Self {
        let target = *snapshot.target();
        let mut getters = HashMap::default();
        let mut setters = HashMap::default();

        for (index, prop) in snapshot.entries() {
            let key = snapshot.policy().fold(prop.name());
            // Ambiguous folds resolve to neither property; leaving them out
            // of the entry caches reports them at access time instead.
            if snapshot.is_ambiguous(key.as_ref()) {
                continue;
            }
            if prop.is_readable() {
                getters.insert(key.clone(), WeakGetter::from_parts(target, index, prop));
            }
            if prop.is_writable() {
                setters.insert(key, WeakSetter::from_parts(target, index, prop));
            }
        }

        Self {
            snapshot,
            getters,
            setters,
        }
    }

    /// Reads a property as a borrow of the instance.
    pub fn get<'a>(
        &self,
        instance: &'a dyn Reflect,
        name: &str,
    ) -> Result<&'a dyn Reflect, AccessError> {
        let type_path = instance.reflect_type_path();
        let target = self.check_instance(instance)?;

        let folded = self.snapshot.policy().fold(name);
        match self.getters.get(folded.as_ref()) {
            Some(entry) => entry.get(target),
            None => Err(self.read_failure(type_path, name, folded.as_ref())),
        }
    }

    /// Reads a property, cloning the value into a box.
    ///
    /// The box is a disconnected copy: mutating it never affects the
    /// instance it was read from. Properties whose values do not support
    /// reflected cloning fail [`AccessError::CloneFailed`].
    pub fn get_owned(
        &self,
        instance: &dyn Reflect,
        name: &str,
    ) -> Result<Box<dyn Reflect>, AccessError> {
        Ok(self.get(instance, name)?.reflect_clone()?)
    }

    /// Writes a property.
    ///
    /// A value of the wrong type fails [`AccessError::TypeMismatch`] naming
    /// the declared and the received type.
    pub fn set(
        &self,
        instance: &mut dyn Reflect,
        name: &str,
        value: Box<dyn Reflect>,
    ) -> Result<(), AccessError> {
        let type_path = instance.reflect_type_path();
        let target = self.check_instance_mut(instance)?;

        let folded = self.snapshot.policy().fold(name);
        match self.setters.get(folded.as_ref()) {
            Some(entry) => entry.set(target, value),
            None => Err(self.write_failure(type_path, name, folded.as_ref())),
        }
    }

    /// The snapshot this accessor was built over.
    #[inline]
    pub const fn snapshot(&self) -> &PropertySnapshot {
        &self.snapshot
    }

    /// The policy this accessor was built under.
    #[inline]
    pub const fn policy(&self) -> Policy {
        self.snapshot.policy()
    }

    /// The type this accessor reads and writes.
    #[inline]
    pub const fn target(&self) -> &Type {
        self.snapshot.target()
    }

    /// Iterates the accessible properties in descriptor order.
    #[inline]
    pub fn properties(&self) -> impl ExactSizeIterator<Item = &'static PropertyInfo> + '_ {
        self.snapshot.properties()
    }

    fn check_instance<'a>(&self, instance: &'a dyn Reflect) -> Result<&'a dyn Struct, AccessError> {
        if !self.snapshot.describes(instance) {
            return Err(AccessError::TargetMismatch {
                expected: Cow::Borrowed(self.snapshot.target().path()),
                received: Cow::Borrowed(instance.reflect_type_path()),
            });
        }
        Ok(instance.reflect_ref().as_struct()?)
    }

    fn check_instance_mut<'a>(
        &self,
        instance: &'a mut dyn Reflect,
    ) -> Result<&'a mut dyn Struct, AccessError> {
        if !self.snapshot.describes(&*instance) {
            return Err(AccessError::TargetMismatch {
                expected: Cow::Borrowed(self.snapshot.target().path()),
                received: Cow::Borrowed(instance.reflect_type_path()),
            });
        }
        Ok(instance.reflect_mut().as_struct()?)
    }

    #[inline(never)]
    fn read_failure(&self, type_path: &'static str, name: &str, folded: &str) -> AccessError {
        if self.snapshot.is_ambiguous(folded) {
            AccessError::Ambiguous {
                target: Cow::Borrowed(type_path),
                property: Cow::Owned(name.to_owned()),
            }
        } else {
            AccessError::NotReadable {
                target: Cow::Borrowed(type_path),
                property: Cow::Owned(name.to_owned()),
            }
        }
    }

    #[inline(never)]
    fn write_failure(&self, type_path: &'static str, name: &str, folded: &str) -> AccessError {
        if self.snapshot.is_ambiguous(folded) {
            AccessError::Ambiguous {
                target: Cow::Borrowed(type_path),
                property: Cow::Owned(name.to_owned()),
            }
        } else {
            AccessError::NotWritable {
                target: Cow::Borrowed(type_path),
                property: Cow::Owned(name.to_owned()),
            }
        }
    }
}

impl core::fmt::Debug for ObjectAccessor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObjectAccessor")
            .field("target", self.snapshot.target())
            .field("policy", &self.snapshot.policy())
            .field("getters", &self.getters.len())
            .field("setters", &self.setters.len())
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
    pub struct Beacon {
        pub id: u32,
        pub label: String,
    }

    #[test]
    fn indexer_round_trip() {
        let access = ObjectAccessor::of::<Beacon>();
        let mut beacon = Beacon::default();

        access.set(&mut beacon, "id", Box::new(77_u32)).unwrap();
        access
            .set(&mut beacon, "label", Box::new(String::from("north")))
            .unwrap();

        assert_eq!(access.get(&beacon, "id").unwrap().downcast_ref(), Some(&77_u32));
        assert_eq!(beacon.label, "north");
    }

    #[test]
    fn unknown_names_name_the_runtime_type() {
        let access = ObjectAccessor::of::<Beacon>();
        let mut beacon = Beacon::default();

        let err = access.get(&beacon, "frequency").unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("does not support reading property `frequency`"));
        assert!(rendered.contains("Beacon"));

        let err = access
            .set(&mut beacon, "frequency", Box::new(1_u32))
            .unwrap_err();
        assert!(err.to_string().contains("does not support writing property `frequency`"));
    }

    #[test]
    fn foreign_instances_fail_target_mismatch() {
        #[derive(Reflect, Default)]
        pub struct Decoy {
            pub id: u32,
        }

        let access = ObjectAccessor::of::<Beacon>();
        let decoy = Decoy::default();

        assert!(matches!(
            access.get(&decoy, "id"),
            Err(AccessError::TargetMismatch { .. })
        ));
    }

    #[test]
    fn owned_reads_are_disconnected_copies() {
        let access = ObjectAccessor::of::<Beacon>();
        let mut beacon = Beacon::default();
        beacon.label = String::from("base");

        let mut copy = access.get_owned(&beacon, "label").unwrap();
        copy.downcast_mut::<String>().unwrap().push_str("-copy");

        assert_eq!(beacon.label, "base");
        assert_eq!(copy.downcast_ref::<String>().unwrap(), "base-copy");
    }

    #[test]
    fn unclonable_properties_fail_owned_reads() {
        #[derive(Reflect, Default)]
        pub struct Inner {
            pub n: u32,
        }

        #[derive(Reflect, Default)]
        pub struct Outer {
            pub inner: Inner,
        }

        let access = ObjectAccessor::of::<Outer>();
        let outer = Outer::default();

        // Borrowed reads work; the owned read needs `reflect_clone`.
        access.get(&outer, "inner").unwrap();
        assert!(matches!(
            access.get_owned(&outer, "inner"),
            Err(AccessError::CloneFailed(_))
        ));
    }

    #[test]
    fn case_insensitive_accessors_fold_lookups() {
        let access = ObjectAccessor::with_policy::<Beacon>(Policy::new().ignore_case());
        let mut beacon = Beacon::default();

        access.set(&mut beacon, "ID", Box::new(5_u32)).unwrap();
        assert_eq!(access.get(&beacon, "Id").unwrap().downcast_ref(), Some(&5_u32));
    }

    #[test]
    fn ambiguous_folds_are_reported() {
        #[derive(Reflect, Default)]
        pub struct Clash {
            pub mode: u8,
            #[reflect(rename = "Mode")]
            pub loud_mode: u8,
        }

        let access = ObjectAccessor::with_policy::<Clash>(Policy::new().ignore_case());
        let clash = Clash::default();

        assert!(matches!(
            access.get(&clash, "mode"),
            Err(AccessError::Ambiguous { .. })
        ));
    }

    #[test]
    fn accessors_mirror_their_snapshot() {
        let access = ObjectAccessor::of::<Beacon>();
        assert!(access.target().is::<Beacon>());
        assert_eq!(access.properties().count(), 2);
        assert_eq!(access.policy(), Policy::new());
    }

    #[test]
    fn paired_directions_share_one_backing_slot() {
        use crate::impls::NonGenericTypeInfoCell;
        use crate::info::{StructInfo, TypePath};
        use crate::ops::{CloneError, PropertyIter, ReflectMut, ReflectRef};

        // One backing field exposed twice: a write-only inlet and a
        // read-only outlet.
        struct Latch {
            level: f64,
        }

        impl TypePath for Latch {
            fn type_path() -> &'static str {
                "tests::Latch"
            }
            fn type_name() -> &'static str {
                "Latch"
            }
            fn type_ident() -> &'static str {
                "Latch"
            }
        }

        impl Typed for Latch {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    TypeInfo::Struct(StructInfo::new::<Self>(vec![
                        PropertyInfo::new::<f64>("input").write_only(),
                        PropertyInfo::new::<f64>("output").read_only(),
                    ]))
                })
            }
        }

        impl Struct for Latch {
            fn property(&self, name: &str) -> Option<&dyn Reflect> {
                match name {
                    "output" => Some(&self.level),
                    _ => None,
                }
            }

            fn property_mut(&mut self, name: &str) -> Option<&mut dyn Reflect> {
                match name {
                    "input" => Some(&mut self.level),
                    _ => None,
                }
            }

            fn property_at(&self, index: usize) -> Option<&dyn Reflect> {
                match index {
                    1 => Some(&self.level),
                    _ => None,
                }
            }

            fn property_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
                match index {
                    0 => Some(&mut self.level),
                    _ => None,
                }
            }

            fn name_at(&self, index: usize) -> Option<&str> {
                match index {
                    0 => Some("input"),
                    1 => Some("output"),
                    _ => None,
                }
            }

            fn property_len(&self) -> usize {
                2
            }

            fn iter_properties(&self) -> PropertyIter<'_> {
                PropertyIter::new(self)
            }
        }

        impl Reflect for Latch {
            fn as_reflect(&self) -> &dyn Reflect {
                self
            }

            fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
                self
            }

            fn into_reflect(self: Box<Self>) -> Box<dyn Reflect> {
                self
            }

            fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                *self = value.take::<Self>()?;
                Ok(())
            }

            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Struct(self)
            }

            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Struct(self)
            }

            fn reflect_clone(&self) -> Result<Box<dyn Reflect>, CloneError> {
                Ok(Box::new(Self { level: self.level }))
            }
        }

        let access = ObjectAccessor::of::<Latch>();
        let mut latch = Latch { level: 0.0 };

        access.set(&mut latch, "input", Box::new(7.5_f64)).unwrap();
        let output = access.get(&latch, "output").unwrap();
        assert_eq!(output.downcast_ref::<f64>(), Some(&7.5));

        assert!(matches!(
            access.get(&latch, "input"),
            Err(AccessError::NotReadable { .. })
        ));
        assert!(matches!(
            access.set(&mut latch, "output", Box::new(1.0_f64)),
            Err(AccessError::NotWritable { .. })
        ));
    }
}
