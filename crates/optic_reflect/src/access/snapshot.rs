use std::borrow::Cow;

use optic_utils::hash::hashbrown::hash_map::Entry;
use optic_utils::hash::{HashMap, HashSet};

use crate::Reflect;
use crate::access::{AccessError, Policy};
use crate::info::{KindError, PropertyInfo, StructInfo, Type, TypeInfo, Typed};
use crate::ops::Struct;

/// An immutable description of one type's accessible properties under one
/// [`Policy`], captured when the snapshot is built.
///
/// The snapshot applies the policy once: non-public properties are filtered
/// out (unless included), names are folded into their lookup form, and
/// colliding folds are recorded as ambiguous. Every accessor layer built on
/// top of one snapshot observes exactly this property set.
///
/// Properties shadowed by an earlier declaration with the same name (a
/// flattened base hidden behind an own property) stay out of the snapshot
/// entirely.
///
/// # Examples
///
/// ```
/// use optic_reflect::access::{Policy, PropertySnapshot};
/// use optic_reflect::derive::Reflect;
///
/// #[derive(Reflect)]
/// pub struct Panel {
///     pub width: u32,
///     height: u32,
/// }
///
/// let snapshot = PropertySnapshot::of::<Panel>(Policy::new());
/// assert_eq!(snapshot.property_len(), 1);
/// assert!(snapshot.resolve("height").is_err());
///
/// let open = PropertySnapshot::of::<Panel>(Policy::new().include_non_public());
/// assert_eq!(open.property_len(), 2);
/// assert_eq!(open.resolve("height").unwrap().type_path(), "u32");
/// ```
pub struct PropertySnapshot {
    target: Type,
    policy: Policy,
    /// Descriptor index in the target's [`StructInfo`], plus the descriptor.
    entries: Box<[(usize, &'static PropertyInfo)]>,
    /// Folded name to position in `entries`.
    index: HashMap<Cow<'static, str>, usize>,
    /// Folded names claimed by more than one property.
    ambiguous: HashSet<Cow<'static, str>>,
}

impl PropertySnapshot {
    /// Builds the snapshot of a concrete struct type.
    pub fn of<T: Struct + Typed>(policy: Policy) -> Self {
        Self::build(super::build::struct_info_of::<T>(), policy)
    }

    /// Builds a snapshot from type information.
    ///
    /// Fails when the information does not describe a struct.
    pub fn from_info(info: &'static TypeInfo, policy: Policy) -> Result<Self, KindError> {
        Ok(Self::build(info.as_struct()?, policy))
    }

    /// Builds a snapshot from an instance's runtime type information.
    ///
    /// Fails when the instance is not a struct.
    pub fn from_instance(instance: &dyn Reflect, policy: Policy) -> Result<Self, KindError> {
        Self::from_info(instance.reflect_type_info(), policy)
    }

    fn build(info: &'static StructInfo, policy: Policy) -> Self {
        let mut entries = Vec::with_capacity(info.property_len());
        let mut index = HashMap::default();
        let mut ambiguous = HashSet::default();

        for (i, prop) in info.iter().enumerate() {
            // Shadowed duplicates resolve to their first declaration.
            if info.index_of(prop.name()) != Some(i) {
                continue;
            }
            if !policy.admits(prop) {
                continue;
            }

            let key = policy.fold(prop.name());
            let slot = entries.len();
            entries.push((i, prop));

            match index.entry(key) {
                Entry::Occupied(entry) => {
                    // Two distinct names folding onto one key. Neither
                    // spelling resolves from here on.
                    ambiguous.insert(entry.key().clone());
                }
                Entry::Vacant(entry) => {
                    entry.insert(slot);
                }
            }
        }

        Self {
            target: *info.ty(),
            policy,
            entries: entries.into_boxed_slice(),
            index,
            ambiguous,
        }
    }

    /// The type this snapshot was built for.
    #[inline]
    pub const fn target(&self) -> &Type {
        &self.target
    }

    /// The policy this snapshot was built under.
    #[inline]
    pub const fn policy(&self) -> Policy {
        self.policy
    }

    /// Returns whether the given instance is of the snapshot's target type.
    #[inline]
    pub fn describes(&self, instance: &dyn Reflect) -> bool {
        self.target.id() == instance.ty_id()
    }

    /// Resolves a name to its property descriptor.
    ///
    /// Lookup folds the name under the snapshot's policy; exact-case
    /// snapshots never allocate here.
    #[inline]
    pub fn resolve(&self, name: &str) -> Result<&'static PropertyInfo, AccessError> {
        self.resolve_at(name).map(|(_, prop)| prop)
    }

    /// Resolves a name to its descriptor index and descriptor.
    ///
    /// The index is the property's position in the target's [`StructInfo`]
    /// descriptor order, usable with [`Struct::property_at`].
    pub fn resolve_at(&self, name: &str) -> Result<(usize, &'static PropertyInfo), AccessError> {
        let folded = self.policy.fold(name);

        if self.ambiguous.contains(folded.as_ref()) {
            return Err(AccessError::Ambiguous {
                target: Cow::Borrowed(self.target.path()),
                property: Cow::Owned(name.to_owned()),
            });
        }
        match self.index.get(folded.as_ref()) {
            Some(&slot) => Ok(self.entries[slot]),
            None => Err(AccessError::NotFound {
                target: Cow::Borrowed(self.target.path()),
                property: Cow::Owned(name.to_owned()),
            }),
        }
    }

    /// Iterates the snapshot's properties in descriptor order.
    #[inline]
    pub fn properties(&self) -> impl ExactSizeIterator<Item = &'static PropertyInfo> + '_ {
        self.entries.iter().map(|&(_, prop)| prop)
    }

    /// Iterates descriptor indices alongside the properties.
    #[inline]
    pub(crate) fn entries(&self) -> impl ExactSizeIterator<Item = (usize, &'static PropertyInfo)> + '_ {
        self.entries.iter().copied()
    }

    /// Whether a folded key is claimed by more than one property.
    #[inline]
    pub(crate) fn is_ambiguous(&self, folded: &str) -> bool {
        self.ambiguous.contains(folded)
    }

    /// The number of accessible properties.
    #[inline]
    pub const fn property_len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no property passed the policy filter.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl core::fmt::Debug for PropertySnapshot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PropertySnapshot")
            .field("target", &self.target)
            .field("policy", &self.policy)
            .field("properties", &self.property_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::Reflect;

    #[derive(Reflect, Default)]
    pub struct Panel {
        pub width: u32,
        height: u32,
        pub label: String,
    }

    #[test]
    fn default_policy_hides_non_public() {
        let snapshot = PropertySnapshot::of::<Panel>(Policy::new());
        assert_eq!(snapshot.property_len(), 2);
        assert!(matches!(
            snapshot.resolve("height"),
            Err(AccessError::NotFound { .. })
        ));

        let open = PropertySnapshot::of::<Panel>(Policy::new().include_non_public());
        assert_eq!(open.property_len(), 3);
        open.resolve("height").unwrap();
    }

    #[test]
    fn indices_follow_descriptor_order() {
        // `height` is filtered out, yet `label` keeps its descriptor index.
        let snapshot = PropertySnapshot::of::<Panel>(Policy::new());
        let (index, prop) = snapshot.resolve_at("label").unwrap();
        assert_eq!(index, 2);
        assert_eq!(prop.name(), "label");
    }

    #[test]
    fn ignore_case_folds_lookups() {
        let snapshot = PropertySnapshot::of::<Panel>(Policy::new());
        assert!(snapshot.resolve("WIDTH").is_err());

        let folded = PropertySnapshot::of::<Panel>(Policy::new().ignore_case());
        assert_eq!(folded.resolve("WIDTH").unwrap().name(), "width");
        assert_eq!(folded.resolve("Width").unwrap().name(), "width");
    }

    #[test]
    fn colliding_folds_resolve_to_neither() {
        #[derive(Reflect)]
        pub struct Clash {
            pub item: u32,
            #[reflect(rename = "Item")]
            pub other: u32,
        }

        // Exact-case: both spellings are distinct properties.
        let exact = PropertySnapshot::of::<Clash>(Policy::new());
        assert_eq!(exact.resolve_at("item").unwrap().0, 0);
        assert_eq!(exact.resolve_at("Item").unwrap().0, 1);

        // Case-insensitive: the fold collides, neither spelling resolves.
        let folded = PropertySnapshot::of::<Clash>(Policy::new().ignore_case());
        assert!(matches!(
            folded.resolve("item"),
            Err(AccessError::Ambiguous { .. })
        ));
        assert!(matches!(
            folded.resolve("ITEM"),
            Err(AccessError::Ambiguous { .. })
        ));
    }

    #[test]
    fn foreign_instances_are_detected() {
        let snapshot = PropertySnapshot::of::<Panel>(Policy::new());
        assert!(snapshot.describes(&Panel::default()));
        assert!(!snapshot.describes(&7_u32));
    }

    #[test]
    fn opaque_targets_are_rejected() {
        let err = PropertySnapshot::from_instance(&5_u32, Policy::new()).unwrap_err();
        assert_eq!(err.to_string(), "kind mismatch: expected struct, received opaque");
    }

    #[test]
    fn flattened_properties_keep_their_declaring_type() {
        use crate::info::TypePath;

        #[derive(Reflect, Default)]
        pub struct Base {
            pub id: u32,
            pub label: String,
        }

        #[derive(Reflect, Default)]
        pub struct Outer {
            pub label: String,
            #[reflect(flatten)]
            pub base: Base,
        }

        // The own `label` shadows the embedded one; `id` is spliced behind it.
        let snapshot = PropertySnapshot::of::<Outer>(Policy::new());
        assert_eq!(snapshot.property_len(), 2);

        let (index, label) = snapshot.resolve_at("label").unwrap();
        assert_eq!(index, 0);
        assert_eq!(label.declaring_type_path(), Some(Outer::type_path()));

        let id = snapshot.resolve("id").unwrap();
        assert_eq!(id.declaring_type_path(), Some(Base::type_path()));

        // Name lookup on the value itself falls through to the embedded field.
        let mut outer = Outer::default();
        *outer.property_mut("id").unwrap().downcast_mut::<u32>().unwrap() = 9;
        assert_eq!(outer.base.id, 9);
    }
}
