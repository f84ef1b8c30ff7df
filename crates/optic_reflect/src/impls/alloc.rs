use core::fmt;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell, concat};
use crate::info::{OpaqueInfo, TypeInfo, TypePath, Typed};

// -----------------------------------------------------------------------------
// String

impl TypePath for String {
    #[inline]
    fn type_path() -> &'static str {
        "std::string::String"
    }
    #[inline]
    fn type_name() -> &'static str {
        "String"
    }
    #[inline]
    fn type_ident() -> &'static str {
        "String"
    }
    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("std::string")
    }
}

impl Typed for String {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
    }
}

impl Reflect for String {
    crate::impls::impl_opaque_reflect!();
}

// -----------------------------------------------------------------------------
// Vec

impl<T: TypePath> TypePath for Vec<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["std::vec::Vec", "<", T::type_path(), ">"]))
    }
    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Vec", "<", T::type_name(), ">"]))
    }
    #[inline]
    fn type_ident() -> &'static str {
        "Vec"
    }
    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("std::vec")
    }
}

impl<T> Typed for Vec<T>
where
    T: Reflect + TypePath + Clone + PartialEq + fmt::Debug,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
    }
}

impl<T> Reflect for Vec<T>
where
    T: Reflect + TypePath + Clone + PartialEq + fmt::Debug,
{
    crate::impls::impl_opaque_reflect!();
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::TypePath;

    #[test]
    fn generic_paths_nest() {
        assert_eq!(<Vec<u8>>::type_path(), "std::vec::Vec<u8>");
        assert_eq!(<Vec<Vec<u8>>>::type_name(), "Vec<Vec<u8>>");
        assert_eq!(<Vec<String>>::type_path(), "std::vec::Vec<std::string::String>");
    }

    #[test]
    fn vec_is_an_opaque_value() {
        let mut items = vec![1_u32, 2, 3];
        items.set(Box::new(vec![9_u32])).unwrap();
        assert_eq!(items, [9]);

        assert_eq!(items.reflect_partial_eq(&vec![9_u32]), Some(true));
        assert_eq!(items.reflect_partial_eq(&vec![9_u64]), Some(false));
    }
}
