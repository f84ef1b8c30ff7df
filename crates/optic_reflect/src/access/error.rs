use std::borrow::Cow;

use core::{error, fmt};

use crate::info::KindError;
use crate::ops::CloneError;

// -----------------------------------------------------------------------------
// AccessError

/// An enumeration of all error outcomes of building or using an accessor.
///
/// Probe surfaces ([`TypedAccessor::try_get`] / [`try_set`]) flatten every
/// one of these into `None` / `false`; everything else reports them eagerly.
///
/// # Examples
///
/// ```
/// use optic_reflect::access::{AccessError, ObjectAccessor};
/// use optic_reflect::derive::Reflect;
///
/// #[derive(Reflect, Default)]
/// pub struct Probe {
///     pub depth: f64,
/// }
///
/// let access = ObjectAccessor::of::<Probe>();
/// let err = access.get(&Probe::default(), "angle").unwrap_err();
///
/// assert!(matches!(err, AccessError::NotReadable { .. }));
/// // "`…::Probe` does not support reading property `angle`"
/// assert!(err.to_string().contains("does not support reading property `angle`"));
/// ```
///
/// [`TypedAccessor::try_get`]: crate::access::TypedAccessor::try_get
/// [`try_set`]: crate::access::TypedAccessor::try_set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The target type declares no property with the given name.
    NotFound {
        target: Cow<'static, str>,
        property: Cow<'static, str>,
    },
    /// Under case-insensitive lookup, the name folds onto more than one
    /// declared property.
    Ambiguous {
        target: Cow<'static, str>,
        property: Cow<'static, str>,
    },
    /// The property cannot be read: unknown to this accessor, or write-only.
    NotReadable {
        target: Cow<'static, str>,
        property: Cow<'static, str>,
    },
    /// The property cannot be written: unknown to this accessor, or read-only.
    NotWritable {
        target: Cow<'static, str>,
        property: Cow<'static, str>,
    },
    /// The property is declared with a different type than the one used.
    TypeMismatch {
        property: Cow<'static, str>,
        expected: Cow<'static, str>,
        received: Cow<'static, str>,
    },
    /// The instance handed to the accessor is not of the accessor's target
    /// type.
    TargetMismatch {
        expected: Cow<'static, str>,
        received: Cow<'static, str>,
    },
    /// An owned read failed because the property value does not support
    /// cloning through reflection.
    CloneFailed(CloneError),
    /// The target type is not a struct.
    NotStruct(KindError),
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { target, property } => {
                write!(f, "type `{target}` has no property `{property}`")
            }
            Self::Ambiguous { target, property } => {
                write!(
                    f,
                    "property `{property}` of `{target}` is ambiguous under case-insensitive lookup"
                )
            }
            Self::NotReadable { target, property } => {
                write!(f, "`{target}` does not support reading property `{property}`")
            }
            Self::NotWritable { target, property } => {
                write!(f, "`{target}` does not support writing property `{property}`")
            }
            Self::TypeMismatch {
                property,
                expected,
                received,
            } => {
                write!(
                    f,
                    "property `{property}` is declared as `{expected}`, received `{received}`"
                )
            }
            Self::TargetMismatch { expected, received } => {
                write!(
                    f,
                    "accessor built for `{expected}` received a `{received}` instance"
                )
            }
            Self::CloneFailed(err) => fmt::Display::fmt(err, f),
            Self::NotStruct(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl error::Error for AccessError {}

impl From<CloneError> for AccessError {
    #[inline]
    fn from(value: CloneError) -> Self {
        Self::CloneFailed(value)
    }
}

impl From<KindError> for AccessError {
    #[inline]
    fn from(value: KindError) -> Self {
        Self::NotStruct(value)
    }
}

// -----------------------------------------------------------------------------
// ConstructError

/// An enumeration of all error outcomes of [`Constructor::construct`].
///
/// # Examples
///
/// ```
/// use optic_reflect::access::ConstructError;
/// use optic_reflect::constructor;
///
/// #[derive(Debug)]
/// pub struct Pair(u32, u32);
///
/// impl Pair {
///     pub fn new(a: u32, b: u32) -> Self {
///         Pair(a, b)
///     }
/// }
///
/// let ctor = constructor!(Pair::new(u32, u32));
///
/// let err = ctor.construct(vec![Box::new(1_u32)]).unwrap_err();
/// assert_eq!(err, ConstructError::Arity { expected: 2, received: 1 });
///
/// let err = ctor
///     .construct(vec![Box::new(1_u32), Box::new(2_i64)])
///     .unwrap_err();
/// assert!(matches!(err, ConstructError::Argument { index: 1, .. }));
/// ```
///
/// [`Constructor::construct`]: crate::access::Constructor::construct
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructError {
    /// The argument list length does not match the parameter list length.
    Arity { expected: usize, received: usize },
    /// An argument is not of the declared parameter type.
    Argument {
        index: usize,
        expected: Cow<'static, str>,
        received: Cow<'static, str>,
    },
}

impl fmt::Display for ConstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arity { expected, received } => {
                write!(
                    f,
                    "constructor takes {expected} arguments, received {received}"
                )
            }
            Self::Argument {
                index,
                expected,
                received,
            } => {
                write!(
                    f,
                    "constructor argument {index} is declared as `{expected}`, received `{received}`"
                )
            }
        }
    }
}

impl error::Error for ConstructError {}
