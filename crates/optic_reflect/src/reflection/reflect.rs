use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{DynamicTypePath, DynamicTyped, ReflectKind};
use crate::ops::{CloneError, ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The widest representation of a reflected value.
///
/// Every type that participates in property access implements `Reflect`,
/// usually through [`#[derive(Reflect)]`](crate::derive::Reflect) or the
/// built-in implementations for primitives. Instances and property values
/// travel through the accessor layer as `&dyn Reflect`, `&mut dyn Reflect`
/// or `Box<dyn Reflect>`.
///
/// # Examples
///
/// ```
/// use optic_reflect::Reflect;
///
/// let boxed: Box<dyn Reflect> = 10_u32.into_boxed_reflect();
/// assert_eq!(boxed.reflect_type_path(), "u32");
/// assert_eq!(boxed.take::<u32>().unwrap(), 10);
/// ```
pub trait Reflect: DynamicTypePath + DynamicTyped + Send + Sync + Any {
    /// Upcasts to a [`Reflect`] trait object.
    fn as_reflect(&self) -> &dyn Reflect;

    /// Upcasts to a mutable [`Reflect`] trait object.
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;

    /// Converts the box into a boxed [`Reflect`] trait object.
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>;

    /// Boxes the value into a [`Reflect`] trait object.
    #[inline]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        Any::type_id(self)
    }

    /// Replaces `self` with the boxed value.
    ///
    /// Fails when the runtime types differ, handing the value back to the
    /// caller untouched. This is the assignment primitive behind every
    /// untyped setter.
    ///
    /// # Examples
    ///
    /// ```
    /// use optic_reflect::Reflect;
    ///
    /// let mut n = 1_u64;
    /// n.set(Box::new(5_u64)).unwrap();
    /// assert_eq!(n, 5);
    ///
    /// // A `u32` cannot be assigned into a `u64` slot.
    /// let rejected = n.set(Box::new(5_u32)).unwrap_err();
    /// assert_eq!(rejected.reflect_type_path(), "u32");
    /// ```
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Returns the structural kind of the underlying type.
    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        self.reflect_ref().kind()
    }

    /// Borrows `self` as a kind-specific view.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Mutably borrows `self` as a kind-specific view.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Clones the value into a new box.
    ///
    /// Types opt into this; the derive emits it for `#[reflect(clone)]`
    /// and every built-in opaque implementation supports it.
    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, CloneError>;

    /// Compares `self` with another reflected value.
    ///
    /// `None` means the comparison is not supported by this type.
    #[inline]
    fn reflect_partial_eq(&self, value: &dyn Reflect) -> Option<bool> {
        let _ = value;
        None
    }

    /// Formats the value for diagnostics; drives `Debug for dyn Reflect`.
    #[inline]
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reflect({})", self.reflect_type_path())
    }
}

// -----------------------------------------------------------------------------
// dyn Reflect

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use optic_reflect::Reflect;
    ///
    /// let x: &dyn Reflect = &7_i16;
    /// assert!(x.is::<i16>());
    /// assert!(!x.is::<i32>());
    /// ```
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts to a shared reference of type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use optic_reflect::Reflect;
    ///
    /// let x: &dyn Reflect = &String::from("hub");
    /// assert_eq!(x.downcast_ref::<String>().map(String::as_str), Some("hub"));
    /// assert!(x.downcast_ref::<u8>().is_none());
    /// ```
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref::<T>(self)
    }

    /// Downcasts to an exclusive reference of type `T`.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut::<T>(self)
    }

    /// Downcasts the box to type `T`, or returns it on mismatch.
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            // TODO: replace with `downcast_unchecked` once it is stable.
            #[expect(unsafe_code, reason = "type is already checked")]
            Ok(unsafe { <Box<dyn Any>>::downcast::<T>(self).unwrap_unchecked() })
        } else {
            Err(self)
        }
    }

    /// Downcasts and unboxes the value, or returns the box on mismatch.
    ///
    /// # Examples
    ///
    /// ```
    /// use optic_reflect::Reflect;
    ///
    /// let x: Box<dyn Reflect> = Box::new(3.5_f64);
    /// assert_eq!(x.take::<f64>().unwrap(), 3.5);
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|boxed| *boxed)
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}
