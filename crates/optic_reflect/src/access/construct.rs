use std::borrow::Cow;
use std::vec;

use crate::Reflect;
use crate::access::ConstructError;
use crate::info::{TypeInfo, Typed};

// -----------------------------------------------------------------------------
// Constructor

/// A pre-bound factory that builds `T` values from type-erased arguments.
///
/// A constructor pairs a parameter list with a plain function pointer, so
/// invoking one is a direct call with no lookup. Most constructors are
/// written with the [`constructor!`](crate::constructor) macro, which
/// binds an existing factory function; [`by_default`](Self::by_default)
/// covers the zero-argument case for `Default` types.
///
/// [`construct`](Self::construct) checks the argument count before it
/// looks at any value, so a short or long argument list always reports
/// [`ConstructError::Arity`], even when the values are also of the wrong
/// type. Values are then consumed left to right, and the first mismatch
/// reports its position.
///
/// # Examples
///
/// ```
/// use optic_reflect::access::Constructor;
/// use optic_reflect::constructor;
/// use optic_reflect::derive::Reflect;
///
/// #[derive(Reflect)]
/// pub struct Span {
///     pub lo: u32,
///     pub hi: u32,
/// }
///
/// impl Span {
///     pub fn new(lo: u32, hi: u32) -> Self {
///         Self { lo, hi }
///     }
/// }
///
/// let ctor = constructor!(Span::new(u32, u32));
/// assert_eq!(ctor.arity(), 2);
///
/// let span = ctor.construct(vec![Box::new(4_u32), Box::new(9_u32)]).unwrap();
/// assert_eq!((span.lo, span.hi), (4, 9));
/// ```
pub struct Constructor<T> {
    params: Box<[&'static TypeInfo]>,
    invoke: fn(Vec<Box<dyn Reflect>>) -> Result<T, ConstructError>,
}

impl<T> Constructor<T> {
    /// Binds a parameter list to an invocation function.
    ///
    /// The [`constructor!`](crate::constructor) macro generates both
    /// halves from a factory path; call this directly only for factories
    /// the macro cannot express.
    pub fn from_fn(
        params: Vec<&'static TypeInfo>,
        invoke: fn(Vec<Box<dyn Reflect>>) -> Result<T, ConstructError>,
    ) -> Self {
        Self {
            params: params.into_boxed_slice(),
            invoke,
        }
    }

    /// Builds `T` from a type-erased argument list.
    ///
    /// The argument count is checked first; each value is then consumed
    /// left to right and downcast to its declared parameter type.
    pub fn construct(&self, args: Vec<Box<dyn Reflect>>) -> Result<T, ConstructError> {
        if args.len() != self.params.len() {
            return Err(ConstructError::Arity {
                expected: self.params.len(),
                received: args.len(),
            });
        }
        (self.invoke)(args)
    }

    /// The declared parameter types, in call order.
    #[inline]
    pub fn params(&self) -> &[&'static TypeInfo] {
        &self.params
    }

    /// The number of arguments [`construct`](Self::construct) expects.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

impl<T: Default> Constructor<T> {
    /// A zero-argument constructor backed by `T::default`.
    ///
    /// # Examples
    ///
    /// ```
    /// use optic_reflect::access::Constructor;
    ///
    /// #[derive(Default)]
    /// pub struct Flag {
    ///     pub raised: bool,
    /// }
    ///
    /// let ctor = Constructor::<Flag>::by_default();
    /// assert_eq!(ctor.arity(), 0);
    ///
    /// let flag = ctor.construct(Vec::new()).unwrap();
    /// assert!(!flag.raised);
    /// ```
    pub fn by_default() -> Self {
        Self::from_fn(Vec::new(), |_| Ok(T::default()))
    }
}

impl<T> core::fmt::Debug for Constructor<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let params: Vec<&'static str> = self.params.iter().map(|info| info.type_path()).collect();
        f.debug_struct("Constructor")
            .field("target", &core::any::type_name::<T>())
            .field("params", &params)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Macro support

/// Consumes and downcasts the next argument.
///
/// Only called from [`constructor!`](crate::constructor) expansions, after
/// [`Constructor::construct`] has checked the argument count.
#[doc(hidden)]
pub fn take_arg<P: Reflect + Typed>(
    args: &mut vec::IntoIter<Box<dyn Reflect>>,
    index: &mut usize,
) -> Result<P, ConstructError> {
    let at = *index;
    *index += 1;
    let value = args
        .next()
        .expect("arity is checked before arguments are taken");
    match value.take::<P>() {
        Ok(value) => Ok(value),
        Err(rejected) => Err(ConstructError::Argument {
            index: at,
            expected: Cow::Borrowed(P::type_path()),
            received: Cow::Borrowed(rejected.reflect_type_path()),
        }),
    }
}

/// Binds a factory function as a [`Constructor`].
///
/// Takes the path of an existing function followed by its parameter
/// types, and produces a `Constructor` of the function's return type:
///
/// ```
/// use optic_reflect::constructor;
/// use optic_reflect::derive::Reflect;
///
/// #[derive(Reflect)]
/// pub struct Span {
///     pub lo: u32,
///     pub hi: u32,
/// }
///
/// impl Span {
///     pub fn new(lo: u32, hi: u32) -> Self {
///         Self { lo, hi }
///     }
/// }
///
/// let ctor = constructor!(Span::new(u32, u32));
/// let span = ctor.construct(vec![Box::new(2_u32), Box::new(3_u32)]).unwrap();
/// assert_eq!((span.lo, span.hi), (2, 3));
/// ```
///
/// Each parameter type must be [`Typed`](crate::info::Typed); arguments
/// are consumed in declaration order.
#[macro_export]
macro_rules! constructor {
    ($($target:ident)::+ ()) => {
        $crate::access::Constructor::from_fn(::std::vec::Vec::new(), |_| {
            ::core::result::Result::Ok($($target)::+())
        })
    };
    ($($target:ident)::+ ( $($param:ty),+ $(,)? )) => {
        $crate::access::Constructor::from_fn(
            ::std::vec![$(<$param as $crate::info::Typed>::type_info()),+],
            |args| {
                let mut args = args.into_iter();
                let mut index = 0_usize;
                ::core::result::Result::Ok($($target)::+($(
                    $crate::access::take_arg::<$param>(&mut args, &mut index)?
                ),+))
            },
        )
    };
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::Reflect;

    #[derive(Reflect, Default, Debug)]
    pub struct Span {
        pub lo: u32,
        pub hi: u32,
    }

    impl Span {
        pub fn new(lo: u32, hi: u32) -> Self {
            Self { lo, hi }
        }
    }

    mod fixtures {
        pub fn stretched(len: u32) -> super::Span {
            super::Span::new(0, len)
        }
    }

    #[test]
    fn factories_bind_and_invoke() {
        let ctor = constructor!(Span::new(u32, u32));

        assert_eq!(ctor.arity(), 2);
        assert_eq!(ctor.params()[0].type_path(), "u32");

        let span = ctor
            .construct(vec![Box::new(4_u32), Box::new(9_u32)])
            .unwrap();
        assert_eq!((span.lo, span.hi), (4, 9));
    }

    #[test]
    fn module_qualified_factories_bind() {
        let ctor = constructor!(fixtures::stretched(u32));
        let span = ctor.construct(vec![Box::new(12_u32)]).unwrap();
        assert_eq!((span.lo, span.hi), (0, 12));
    }

    #[test]
    fn arity_is_checked_before_values() {
        let ctor = constructor!(Span::new(u32, u32));

        let err = ctor.construct(vec![Box::new(4_u32)]).unwrap_err();
        assert_eq!(
            err,
            ConstructError::Arity {
                expected: 2,
                received: 1,
            },
        );

        // Wrong count wins even when the values are also of the wrong type.
        let err = ctor
            .construct(vec![Box::new(String::from("wide"))])
            .unwrap_err();
        assert!(matches!(err, ConstructError::Arity { .. }));
    }

    #[test]
    fn argument_mismatches_name_their_position() {
        let ctor = constructor!(Span::new(u32, u32));

        let err = ctor
            .construct(vec![Box::new(4_u32), Box::new("nine")])
            .unwrap_err();
        assert_eq!(
            err,
            ConstructError::Argument {
                index: 1,
                expected: "u32".into(),
                received: "&str".into(),
            },
        );

        // Arguments are consumed left to right: the first mismatch reports.
        let err = ctor
            .construct(vec![Box::new(4.0_f64), Box::new("nine")])
            .unwrap_err();
        assert!(matches!(err, ConstructError::Argument { index: 0, .. }));
    }

    #[test]
    fn zero_argument_factories_bind() {
        let ctor = constructor!(Span::default());
        let span = ctor.construct(Vec::new()).unwrap();
        assert_eq!((span.lo, span.hi), (0, 0));
    }

    #[test]
    fn defaults_construct_without_arguments() {
        let ctor = Constructor::<Span>::by_default();

        assert_eq!(ctor.arity(), 0);
        assert!(ctor.params().is_empty());

        let span = ctor.construct(Vec::new()).unwrap();
        assert_eq!((span.lo, span.hi), (0, 0));

        let err = ctor.construct(vec![Box::new(1_u32)]).unwrap_err();
        assert_eq!(
            err,
            ConstructError::Arity {
                expected: 0,
                received: 1,
            },
        );
    }

    #[test]
    fn constructors_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<Constructor<Span>>();
    }
}
