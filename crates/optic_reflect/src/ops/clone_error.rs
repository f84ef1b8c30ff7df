use core::fmt;
use std::borrow::Cow;

/// Failure of [`Reflect::reflect_clone`](crate::Reflect::reflect_clone).
///
/// # Examples
///
/// ```
/// use optic_reflect::derive::Reflect;
/// use optic_reflect::Reflect;
///
/// // No `#[reflect(clone)]`, so reflected cloning is declined.
/// #[derive(Reflect)]
/// pub struct Sealed {
///     pub id: u32,
/// }
///
/// let sealed = Sealed { id: 1 };
/// let err = sealed.reflect_clone().unwrap_err();
/// assert!(err.to_string().contains("Sealed"));
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CloneError {
    /// The type does not expose cloning through reflection.
    NotCloneable {
        /// Path of the type that declined.
        type_path: Cow<'static, str>,
    },
}

impl fmt::Display for CloneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloneError::NotCloneable { type_path } => {
                write!(f, "`{type_path}` does not support cloning through reflection")
            }
        }
    }
}

impl core::error::Error for CloneError {}
