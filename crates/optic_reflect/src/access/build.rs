//! Stateless accessor build functions.
//!
//! Everything here pays its full cost at build time: name resolution under a
//! [`Policy`], the visibility filter, the direction check, and the property
//! type check all happen once, and the product captures only the resolved
//! descriptor index. Calling a product is then a bounds-checked indexed
//! access plus a downcast.
//!
//! - [`Getter`] / [`Setter`]: monomorphized over target and property type.
//! - [`WeakGetter`] / [`WeakSetter`]: type-erased, operating on
//!   `&dyn Struct` / `&mut dyn Struct`.
//!
//! All products are `Send + Sync` and freely shareable.

use std::borrow::Cow;

use core::marker::PhantomData;

use crate::Reflect;
use crate::access::{AccessError, Policy};
use crate::info::{PropertyInfo, StructInfo, Type, Typed};
use crate::ops::Struct;

// -----------------------------------------------------------------------------
// Resolution

/// Returns the struct descriptor of `T`.
#[inline]
pub(crate) fn struct_info_of<T: Struct + Typed>() -> &'static StructInfo {
    T::type_info()
        .as_struct()
        .expect("`Struct` types expose `TypeInfo::Struct`")
}

/// Resolves a name to its descriptor index by linear scan.
///
/// This is the allocation-free counterpart of
/// [`PropertySnapshot::resolve_at`](crate::access::PropertySnapshot::resolve_at)
/// for one-off builds; shadowed duplicates are skipped and a fold collision
/// under `ignore_case` reports [`AccessError::Ambiguous`].
pub(crate) fn resolve_linear(
    info: &'static StructInfo,
    name: &str,
    policy: Policy,
) -> Result<(usize, &'static PropertyInfo), AccessError> {
    let folded = policy.fold(name);
    let mut found = None;

    for (i, prop) in info.iter().enumerate() {
        if info.index_of(prop.name()) != Some(i) {
            continue;
        }
        if !policy.admits(prop) {
            continue;
        }
        if policy.fold(prop.name()) != folded {
            continue;
        }
        if found.is_some() {
            return Err(AccessError::Ambiguous {
                target: Cow::Borrowed(info.type_path()),
                property: Cow::Owned(name.to_owned()),
            });
        }
        found = Some((i, prop));
    }

    found.ok_or_else(|| AccessError::NotFound {
        target: Cow::Borrowed(info.type_path()),
        property: Cow::Owned(name.to_owned()),
    })
}

/// Validates an `(info, index)` pair and returns the descriptor.
fn descriptor_at(
    info: &'static StructInfo,
    index: usize,
) -> Result<&'static PropertyInfo, AccessError> {
    info.property_at(index).ok_or_else(|| AccessError::NotFound {
        target: Cow::Borrowed(info.type_path()),
        property: Cow::Owned(format!("#{index}")),
    })
}

fn check_readable(info: &'static StructInfo, prop: &PropertyInfo) -> Result<(), AccessError> {
    if prop.is_readable() {
        Ok(())
    } else {
        Err(AccessError::NotReadable {
            target: Cow::Borrowed(info.type_path()),
            property: Cow::Borrowed(prop.name()),
        })
    }
}

fn check_writable(info: &'static StructInfo, prop: &PropertyInfo) -> Result<(), AccessError> {
    if prop.is_writable() {
        Ok(())
    } else {
        Err(AccessError::NotWritable {
            target: Cow::Borrowed(info.type_path()),
            property: Cow::Borrowed(prop.name()),
        })
    }
}

fn check_type<P: Typed>(prop: &'static PropertyInfo) -> Result<(), AccessError> {
    if prop.type_is::<P>() {
        Ok(())
    } else {
        Err(AccessError::TypeMismatch {
            property: Cow::Borrowed(prop.name()),
            expected: Cow::Borrowed(prop.type_path()),
            received: Cow::Borrowed(P::type_path()),
        })
    }
}

// -----------------------------------------------------------------------------
// Getter

/// A built read entry for one property of `T`, monomorphized to the
/// property type `P`.
///
/// Build failures are precise: [`NotFound`] for unknown names,
/// [`Ambiguous`] for colliding case-insensitive folds, [`NotReadable`] for
/// write-only properties, and [`TypeMismatch`] when `P` is not the declared
/// type.
///
/// # Examples
///
/// ```
/// use optic_reflect::access::Getter;
/// use optic_reflect::derive::Reflect;
///
/// #[derive(Reflect)]
/// pub struct Wheel {
///     pub radius: f64,
/// }
///
/// // Resolution happens here, once.
/// let radius = Getter::<Wheel, f64>::build("radius").unwrap();
///
/// assert_eq!(radius.get(&Wheel { radius: 0.33 }), 0.33);
/// assert_eq!(radius.get(&Wheel { radius: 4.0 }), 4.0);
/// ```
///
/// [`NotFound`]: AccessError::NotFound
/// [`Ambiguous`]: AccessError::Ambiguous
/// [`NotReadable`]: AccessError::NotReadable
/// [`TypeMismatch`]: AccessError::TypeMismatch
pub struct Getter<T, P> {
    index: usize,
    prop: &'static PropertyInfo,
    marker: PhantomData<fn(&T) -> P>,
}

impl<T: Struct + Typed, P: Reflect + Typed> Getter<T, P> {
    /// Builds a getter under the default [`Policy`].
    #[inline]
    pub fn build(name: &str) -> Result<Self, AccessError> {
        Self::build_with(name, Policy::new())
    }

    /// Builds a getter under the given [`Policy`].
    pub fn build_with(name: &str, policy: Policy) -> Result<Self, AccessError> {
        let info = struct_info_of::<T>();
        let (index, _) = resolve_linear(info, name, policy)?;
        Self::for_property(info, index)
    }

    /// Builds a getter for the property at a known descriptor index.
    pub fn for_property(info: &'static StructInfo, index: usize) -> Result<Self, AccessError> {
        if !info.type_is::<T>() {
            return Err(AccessError::TargetMismatch {
                expected: Cow::Borrowed(T::type_path()),
                received: Cow::Borrowed(info.type_path()),
            });
        }
        let prop = descriptor_at(info, index)?;
        check_readable(info, prop)?;
        check_type::<P>(prop)?;
        Ok(Self {
            index,
            prop,
            marker: PhantomData,
        })
    }

    /// Reads the property, cloning the value out.
    #[inline]
    pub fn get(&self, target: &T) -> P
    where
        P: Clone,
    {
        self.get_ref(target).clone()
    }

    /// Reads the property as a borrow.
    #[inline]
    pub fn get_ref<'a>(&self, target: &'a T) -> &'a P {
        target
            .property_at(self.index)
            .and_then(|value| value.downcast_ref::<P>())
            .expect("build-time checked readable property")
    }

    /// The resolved descriptor index.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The resolved property descriptor.
    #[inline]
    pub const fn info(&self) -> &'static PropertyInfo {
        self.prop
    }
}

impl<T, P> core::fmt::Debug for Getter<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Getter")
            .field("index", &self.index)
            .field("property", &self.prop.name())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Setter

/// A built write entry for one property of `T`, monomorphized to the
/// property type `P`.
///
/// Writing requires `&mut T`. There is no setter over an owned extraction:
/// a write through a copied-out value mutates the copy, never the source.
///
/// # Examples
///
/// ```
/// use optic_reflect::access::Setter;
/// use optic_reflect::derive::Reflect;
///
/// #[derive(Reflect, Default)]
/// pub struct Wheel {
///     pub radius: f64,
/// }
///
/// let radius = Setter::<Wheel, f64>::build("radius").unwrap();
///
/// let mut wheel = Wheel::default();
/// radius.set(&mut wheel, 0.4);
/// assert_eq!(wheel.radius, 0.4);
/// ```
pub struct Setter<T, P> {
    index: usize,
    prop: &'static PropertyInfo,
    marker: PhantomData<fn(&mut T, P)>,
}

impl<T: Struct + Typed, P: Reflect + Typed> Setter<T, P> {
    /// Builds a setter under the default [`Policy`].
    #[inline]
    pub fn build(name: &str) -> Result<Self, AccessError> {
        Self::build_with(name, Policy::new())
    }

    /// Builds a setter under the given [`Policy`].
    pub fn build_with(name: &str, policy: Policy) -> Result<Self, AccessError> {
        let info = struct_info_of::<T>();
        let (index, _) = resolve_linear(info, name, policy)?;
        Self::for_property(info, index)
    }

    /// Builds a setter for the property at a known descriptor index.
    pub fn for_property(info: &'static StructInfo, index: usize) -> Result<Self, AccessError> {
        if !info.type_is::<T>() {
            return Err(AccessError::TargetMismatch {
                expected: Cow::Borrowed(T::type_path()),
                received: Cow::Borrowed(info.type_path()),
            });
        }
        let prop = descriptor_at(info, index)?;
        check_writable(info, prop)?;
        check_type::<P>(prop)?;
        Ok(Self {
            index,
            prop,
            marker: PhantomData,
        })
    }

    /// Writes the property.
    #[inline]
    pub fn set(&self, target: &mut T, value: P) {
        let slot = target
            .property_at_mut(self.index)
            .and_then(|prop| prop.downcast_mut::<P>())
            .expect("build-time checked writable property");
        *slot = value;
    }

    /// The resolved descriptor index.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The resolved property descriptor.
    #[inline]
    pub const fn info(&self) -> &'static PropertyInfo {
        self.prop
    }
}

impl<T, P> core::fmt::Debug for Setter<T, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Setter")
            .field("index", &self.index)
            .field("property", &self.prop.name())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// WeakGetter

/// A built, type-erased read entry over `&dyn Struct`.
///
/// Unlike [`Getter`], the property type stays erased; reads hand back
/// `&dyn Reflect` or a [`reflect_clone`]d box. The entry remembers the type
/// it was built for and rejects foreign instances rather than reading a
/// stranger's property at the same index.
///
/// [`reflect_clone`]: crate::Reflect::reflect_clone
#[derive(Clone, Copy, Debug)]
pub struct WeakGetter {
    target: Type,
    index: usize,
    prop: &'static PropertyInfo,
}

impl WeakGetter {
    /// Builds a read entry for the property at the given descriptor index.
    pub fn new(info: &'static StructInfo, index: usize) -> Result<Self, AccessError> {
        let prop = descriptor_at(info, index)?;
        check_readable(info, prop)?;
        Ok(Self {
            target: *info.ty(),
            index,
            prop,
        })
    }

    /// Caller has already validated the index and direction.
    pub(crate) const fn from_parts(target: Type, index: usize, prop: &'static PropertyInfo) -> Self {
        Self {
            target,
            index,
            prop,
        }
    }

    /// Reads the property as a borrow.
    pub fn get<'a>(&self, instance: &'a dyn Struct) -> Result<&'a dyn Reflect, AccessError> {
        self.check_target(instance)?;
        instance
            .property_at(self.index)
            .ok_or_else(|| AccessError::NotReadable {
                target: Cow::Borrowed(self.target.path()),
                property: Cow::Borrowed(self.prop.name()),
            })
    }

    /// Reads the property, cloning the value into a box.
    ///
    /// The box is a disconnected copy; mutating it never affects the
    /// instance it was read from.
    pub fn get_owned(&self, instance: &dyn Struct) -> Result<Box<dyn Reflect>, AccessError> {
        Ok(self.get(instance)?.reflect_clone()?)
    }

    /// The resolved descriptor index.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The resolved property descriptor.
    #[inline]
    pub const fn info(&self) -> &'static PropertyInfo {
        self.prop
    }

    fn check_target(&self, instance: &dyn Struct) -> Result<(), AccessError> {
        if self.target.id() == instance.ty_id() {
            Ok(())
        } else {
            Err(AccessError::TargetMismatch {
                expected: Cow::Borrowed(self.target.path()),
                received: Cow::Borrowed(instance.reflect_type_path()),
            })
        }
    }
}

// -----------------------------------------------------------------------------
// WeakSetter

/// A built, type-erased write entry over `&mut dyn Struct`.
///
/// Values travel as `Box<dyn Reflect>`; a value of the wrong type is
/// reported as [`AccessError::TypeMismatch`] naming the declared and the
/// received type.
#[derive(Clone, Copy, Debug)]
pub struct WeakSetter {
    target: Type,
    index: usize,
    prop: &'static PropertyInfo,
}

impl WeakSetter {
    /// Builds a write entry for the property at the given descriptor index.
    pub fn new(info: &'static StructInfo, index: usize) -> Result<Self, AccessError> {
        let prop = descriptor_at(info, index)?;
        check_writable(info, prop)?;
        Ok(Self {
            target: *info.ty(),
            index,
            prop,
        })
    }

    /// Caller has already validated the index and direction.
    pub(crate) const fn from_parts(target: Type, index: usize, prop: &'static PropertyInfo) -> Self {
        Self {
            target,
            index,
            prop,
        }
    }

    /// Writes the property.
    pub fn set(
        &self,
        instance: &mut dyn Struct,
        value: Box<dyn Reflect>,
    ) -> Result<(), AccessError> {
        self.check_target(instance)?;
        let slot = instance
            .property_at_mut(self.index)
            .ok_or_else(|| AccessError::NotWritable {
                target: Cow::Borrowed(self.target.path()),
                property: Cow::Borrowed(self.prop.name()),
            })?;
        slot.set(value).map_err(|rejected| AccessError::TypeMismatch {
            property: Cow::Borrowed(self.prop.name()),
            expected: Cow::Borrowed(self.prop.type_path()),
            received: Cow::Borrowed(rejected.reflect_type_path()),
        })
    }

    /// The resolved descriptor index.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The resolved property descriptor.
    #[inline]
    pub const fn info(&self) -> &'static PropertyInfo {
        self.prop
    }

    fn check_target(&self, instance: &dyn Struct) -> Result<(), AccessError> {
        if self.target.id() == instance.ty_id() {
            Ok(())
        } else {
            Err(AccessError::TargetMismatch {
                expected: Cow::Borrowed(self.target.path()),
                received: Cow::Borrowed(instance.reflect_type_path()),
            })
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::Reflect;

    #[derive(Reflect, Default)]
    pub struct Motor {
        pub torque: f64,
        pub serial: String,
        secret: u8,
    }

    #[test]
    fn typed_round_trip() {
        let get = Getter::<Motor, f64>::build("torque").unwrap();
        let set = Setter::<Motor, f64>::build("torque").unwrap();

        let mut motor = Motor::default();
        set.set(&mut motor, 9.5);
        assert_eq!(get.get(&motor), 9.5);
        assert_eq!(motor.torque, 9.5);
        assert_eq!(get.index(), 0);
    }

    #[test]
    fn build_failures_are_precise() {
        assert!(matches!(
            Getter::<Motor, f64>::build("thrust"),
            Err(AccessError::NotFound { .. })
        ));
        assert!(matches!(
            Getter::<Motor, f64>::build(""),
            Err(AccessError::NotFound { .. })
        ));
        assert!(matches!(
            Getter::<Motor, u32>::build("torque"),
            Err(AccessError::TypeMismatch { .. })
        ));
        // Visibility is part of resolution: a hidden name is an unknown name.
        assert!(matches!(
            Getter::<Motor, u8>::build("secret"),
            Err(AccessError::NotFound { .. })
        ));
    }

    #[test]
    fn policy_opens_non_public_and_folds_case() {
        let get =
            Getter::<Motor, u8>::build_with("secret", Policy::new().include_non_public()).unwrap();
        assert_eq!(get.get(&Motor::default()), 0);

        assert!(Getter::<Motor, f64>::build("Torque").is_err());
        let get = Getter::<Motor, f64>::build_with("Torque", Policy::new().ignore_case()).unwrap();
        assert_eq!(get.get(&Motor::default()), 0.0);
    }

    #[test]
    fn direction_is_checked_at_build() {
        #[derive(Reflect, Default)]
        pub struct Tank {
            #[reflect(read_only)]
            pub id: u32,
            #[reflect(write_only)]
            pub command: String,
        }

        Getter::<Tank, u32>::build("id").unwrap();
        Setter::<Tank, String>::build("command").unwrap();

        assert!(matches!(
            Setter::<Tank, u32>::build("id"),
            Err(AccessError::NotWritable { .. })
        ));
        assert!(matches!(
            Getter::<Tank, String>::build("command"),
            Err(AccessError::NotReadable { .. })
        ));
    }

    #[test]
    fn weak_entries_check_their_target() {
        #[derive(Reflect, Default)]
        pub struct Other {
            pub x: f64,
        }

        let info = struct_info_of::<Motor>();
        let getter = WeakGetter::new(info, 0).unwrap();

        let motor = Motor::default();
        let value = getter.get(&motor).unwrap();
        assert_eq!(value.downcast_ref::<f64>(), Some(&0.0));

        let other = Other::default();
        assert!(matches!(
            getter.get(&other),
            Err(AccessError::TargetMismatch { .. })
        ));
    }

    #[test]
    fn weak_setter_reports_mismatched_values() {
        let info = struct_info_of::<Motor>();
        let setter = WeakSetter::new(info, 0).unwrap();

        let mut motor = Motor::default();
        setter.set(&mut motor, Box::new(3.25_f64)).unwrap();
        assert_eq!(motor.torque, 3.25);

        let err = setter.set(&mut motor, Box::new(5_u32)).unwrap_err();
        assert!(matches!(err, AccessError::TypeMismatch { .. }));
        assert_eq!(motor.torque, 3.25);
    }

    #[test]
    fn out_of_range_indices_fail_to_build() {
        let info = struct_info_of::<Motor>();
        assert!(WeakGetter::new(info, 99).is_err());
        assert!(Getter::<Motor, f64>::for_property(info, 99).is_err());
    }

    #[test]
    fn products_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<Getter<Motor, f64>>();
        assert_send_sync::<Setter<Motor, f64>>();
        assert_send_sync::<WeakGetter>();
        assert_send_sync::<WeakSetter>();
    }
}
