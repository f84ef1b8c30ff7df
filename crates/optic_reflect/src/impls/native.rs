use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, TypePath, Typed};

// -----------------------------------------------------------------------------
// Numeric, bool, char

macro_rules! impl_opaque_leaf {
    ($($ty:ty),* $(,)?) => {$(
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                stringify!($ty)
            }
            #[inline]
            fn type_name() -> &'static str {
                stringify!($ty)
            }
            #[inline]
            fn type_ident() -> &'static str {
                stringify!($ty)
            }
        }

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
            }
        }

        impl Reflect for $ty {
            crate::impls::impl_opaque_reflect!();
        }
    )*};
}

impl_opaque_leaf!(
    u8, u16, u32, u64, u128, usize, //
    i8, i16, i32, i64, i128, isize, //
    f32, f64, bool, char,
);

// -----------------------------------------------------------------------------
// str

impl TypePath for str {
    #[inline]
    fn type_path() -> &'static str {
        "str"
    }
    #[inline]
    fn type_name() -> &'static str {
        "str"
    }
    #[inline]
    fn type_ident() -> &'static str {
        "str"
    }
}

impl TypePath for &'static str {
    #[inline]
    fn type_path() -> &'static str {
        "&str"
    }
    #[inline]
    fn type_name() -> &'static str {
        "&str"
    }
    #[inline]
    fn type_ident() -> &'static str {
        "str"
    }
}

impl Typed for &'static str {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
    }
}

impl Reflect for &'static str {
    crate::impls::impl_opaque_reflect!();
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{TypePath, Typed};

    #[test]
    fn primitive_paths_are_bare() {
        assert_eq!(u32::type_path(), "u32");
        assert_eq!(u32::type_name(), "u32");
        assert_eq!(u32::module_path(), None);
        assert_eq!(<&'static str>::type_path(), "&str");
        assert_eq!(<&'static str>::type_ident(), "str");
    }

    #[test]
    fn primitives_are_opaque() {
        assert!(!u8::type_info().is_struct());
        assert!(bool::type_info().as_opaque().is_ok());
    }

    #[test]
    fn set_replaces_same_type_only() {
        let mut value = 10_u32;
        value.set(Box::new(42_u32)).unwrap();
        assert_eq!(value, 42);

        let rejected = value.set(Box::new(7_i32)).unwrap_err();
        assert!(rejected.is::<i32>());
        assert_eq!(value, 42);
    }

    #[test]
    fn partial_eq_requires_exact_type() {
        assert_eq!(3_u32.reflect_partial_eq(&3_u32), Some(true));
        assert_eq!(3_u32.reflect_partial_eq(&4_u32), Some(false));
        assert_eq!(3_u32.reflect_partial_eq(&3_u64), Some(false));
    }
}
