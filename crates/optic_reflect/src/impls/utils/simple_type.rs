/// Expands to the [`Reflect`](crate::Reflect) method bodies of an opaque
/// leaf type.
///
/// The surrounding impl block supplies the type and its bounds; the type
/// must be `Clone + PartialEq + Debug`.
macro_rules! impl_opaque_reflect {
    () => {
        #[inline]
        fn as_reflect(&self) -> &dyn $crate::Reflect {
            self
        }

        #[inline]
        fn as_reflect_mut(&mut self) -> &mut dyn $crate::Reflect {
            self
        }

        #[inline]
        fn into_reflect(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn $crate::Reflect> {
            self
        }

        fn set(
            &mut self,
            value: ::std::boxed::Box<dyn $crate::Reflect>,
        ) -> Result<(), ::std::boxed::Box<dyn $crate::Reflect>> {
            *self = value.take::<Self>()?;
            Ok(())
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::Opaque(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::Opaque(self)
        }

        #[inline]
        fn reflect_clone(
            &self,
        ) -> Result<::std::boxed::Box<dyn $crate::Reflect>, $crate::ops::CloneError> {
            Ok(::std::boxed::Box::new(Clone::clone(self)))
        }

        fn reflect_partial_eq(&self, value: &dyn $crate::Reflect) -> Option<bool> {
            if let Some(value) = <dyn $crate::Reflect>::downcast_ref::<Self>(value) {
                Some(PartialEq::eq(self, value))
            } else {
                Some(false)
            }
        }

        fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
            ::core::fmt::Debug::fmt(self, f)
        }
    };
}

pub(crate) use impl_opaque_reflect;
