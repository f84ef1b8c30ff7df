use core::fmt;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{OpaqueInfo, TypeInfo, TypePath, Typed};

// -----------------------------------------------------------------------------
// Option

impl<T: TypePath> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["std::option::Option", "<", T::type_path(), ">"]))
    }
    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Option", "<", T::type_name(), ">"]))
    }
    #[inline]
    fn type_ident() -> &'static str {
        "Option"
    }
    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("std::option")
    }
}

impl<T> Typed for Option<T>
where
    T: Reflect + TypePath + Clone + PartialEq + fmt::Debug,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
    }
}

impl<T> Reflect for Option<T>
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
    use crate::info::{DynamicTyped, TypePath};

    #[test]
    fn option_paths_nest() {
        assert_eq!(<Option<u32>>::type_path(), "std::option::Option<u32>");
        assert_eq!(<Option<String>>::type_name(), "Option<String>");
    }

    #[test]
    fn option_is_an_opaque_value() {
        let mut slot = Some(5_u32);
        slot.set(Box::new(None::<u32>)).unwrap();
        assert_eq!(slot, None);

        assert_eq!(slot.reflect_type_info().type_name(), "Option<u32>");
        assert_eq!(slot.reflect_partial_eq(&None::<u32>), Some(true));
        assert_eq!(slot.reflect_partial_eq(&None::<u64>), Some(false));
    }
}
