use crate::info::{TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to a type's [`TypeInfo`].
///
/// Implemented by [`#[derive(Reflect)]`](crate::derive::Reflect); the
/// returned reference is built once and cached for the program lifetime.
///
/// # Examples
///
/// ```
/// use optic_reflect::derive::Reflect;
/// use optic_reflect::info::{TypeInfo, Typed};
///
/// #[derive(Reflect)]
/// struct Gauge {
///     pub level: f64,
/// }
///
/// let info: &'static TypeInfo = <Gauge as Typed>::type_info();
/// assert!(info.is_struct());
/// ```
///
/// # Manually Impl
///
/// Hand-written implementations go through the cells in
/// [`impls`](crate::impls) so construction still happens exactly once:
///
/// ```
/// use optic_reflect::impls::NonGenericTypeInfoCell;
/// use optic_reflect::info::{PropertyInfo, StructInfo, TypeInfo, Typed};
/// # use optic_reflect::info::TypePath;
/// # struct Gauge { level: f64 }
/// # impl TypePath for Gauge {
/// #     fn type_path() -> &'static str { "doc::Gauge" }
/// #     fn type_name() -> &'static str { "Gauge" }
/// #     fn type_ident() -> &'static str { "Gauge" }
/// # }
///
/// impl Typed for Gauge {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| {
///             TypeInfo::Struct(StructInfo::new::<Self>(vec![
///                 PropertyInfo::new::<f64>("level"),
///             ]))
///         })
///     }
/// }
/// ```
pub trait Typed: TypePath {
    /// Returns the compile-time type information of `Self`.
    ///
    /// Note: use [`DynamicTyped`] when only a trait object is at hand.
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Dynamic dispatch over [`Typed`].
///
/// Auto-implemented for every `T: Typed`.
pub trait DynamicTyped {
    /// Returns the type information of the underlying type.
    ///
    /// # Examples
    ///
    /// ```
    /// use optic_reflect::derive::Reflect;
    /// use optic_reflect::info::DynamicTyped;
    /// use optic_reflect::Reflect;
    ///
    /// #[derive(Reflect)]
    /// struct Tick {
    ///     pub count: u64,
    /// }
    ///
    /// let boxed: Box<dyn Reflect> = Box::new(Tick { count: 3 });
    /// assert!(boxed.reflect_type_info().is_struct());
    /// ```
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
