use optic_utils::hash::HashMap;

use crate::Reflect;
use crate::info::{PropertyInfo, Type, TypePath};
use crate::info::impl_type_fn;

// -----------------------------------------------------------------------------
// StructInfo

/// Compile-time information of a property-bearing type.
///
/// Holds the ordered property descriptor list plus a name index. The
/// order is the declaration order: a type's own properties first, then
/// the properties spliced in from a flattened embedded type.
///
/// When two descriptors carry the same name (an own property shadowing a
/// flattened one), the first occurrence wins name lookup; the shadowed
/// descriptor keeps its position and stays reachable by index.
///
/// # Examples
///
/// ```
/// use optic_reflect::info::{PropertyInfo, StructInfo, TypePath};
///
/// struct Motor { rpm: u32 }
/// # impl TypePath for Motor {
/// #     fn type_path() -> &'static str { "doc::Motor" }
/// #     fn type_name() -> &'static str { "Motor" }
/// #     fn type_ident() -> &'static str { "Motor" }
/// # }
///
/// let info = StructInfo::new::<Motor>(vec![
///     PropertyInfo::new::<u32>("rpm"),
/// ]);
///
/// assert_eq!(info.property_len(), 1);
/// assert_eq!(info.index_of("rpm"), Some(0));
/// assert_eq!(info.property("rpm").unwrap().type_path(), "u32");
/// ```
#[derive(Debug)]
pub struct StructInfo {
    ty: Type,
    props: Box<[PropertyInfo]>,
    index: HashMap<&'static str, usize>,
}

impl StructInfo {
    /// Creates a new [`StructInfo`] for the type `T`.
    ///
    /// Descriptors without an explicit declaring type are stamped with
    /// `T`; descriptors copied from a flattened type keep theirs.
    pub fn new<T: TypePath + ?Sized>(mut props: Vec<PropertyInfo>) -> Self {
        let mut index = HashMap::with_capacity_and_hasher(props.len(), Default::default());
        for (i, prop) in props.iter_mut().enumerate() {
            prop.stamp_declared_in(T::type_path);
            // First occurrence wins, shadowed names stay out of the index.
            index.entry(prop.name()).or_insert(i);
        }
        Self {
            ty: Type::of::<T>(),
            props: props.into_boxed_slice(),
            index,
        }
    }

    /// Returns the descriptor with the given name, if any.
    #[inline]
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.index_of(name).map(|i| &self.props[i])
    }

    /// Returns the descriptor at the given index, if in bounds.
    #[inline]
    pub fn property_at(&self, index: usize) -> Option<&PropertyInfo> {
        self.props.get(index)
    }

    /// Returns the index of the property with the given name, if any.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// The number of property descriptors, shadowed ones included.
    #[inline]
    pub const fn property_len(&self) -> usize {
        self.props.len()
    }

    /// Iterates the descriptors in declaration order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, PropertyInfo> {
        self.props.iter()
    }

    /// Iterates the property names in declaration order.
    #[inline]
    pub fn property_names(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.props.iter().map(PropertyInfo::name)
    }

    impl_type_fn!(ty);
}

// -----------------------------------------------------------------------------
// Typed helpers

impl StructInfo {
    /// Returns `true` if this information describes the type of `value`.
    #[inline]
    pub fn describes(&self, value: &dyn Reflect) -> bool {
        self.ty.id() == value.ty_id()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    struct Shadowed;

    impl TypePath for Shadowed {
        fn type_path() -> &'static str {
            "tests::Shadowed"
        }
        fn type_name() -> &'static str {
            "Shadowed"
        }
        fn type_ident() -> &'static str {
            "Shadowed"
        }
    }

    #[test]
    fn first_name_occurrence_wins() {
        let info = StructInfo::new::<Shadowed>(vec![
            PropertyInfo::new::<u32>("id"),
            PropertyInfo::new::<String>("id"),
            PropertyInfo::new::<bool>("live"),
        ]);

        assert_eq!(info.property_len(), 3);
        assert_eq!(info.index_of("id"), Some(0));
        assert_eq!(info.property("id").unwrap().type_path(), "u32");
        assert_eq!(info.index_of("live"), Some(2));
    }

    #[test]
    fn declaring_type_is_stamped() {
        let info = StructInfo::new::<Shadowed>(vec![PropertyInfo::new::<u32>("id")]);
        let prop = info.property("id").unwrap();
        assert_eq!(prop.declaring_type_path(), Some("tests::Shadowed"));
    }
}
