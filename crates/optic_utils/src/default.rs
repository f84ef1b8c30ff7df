/// A shorthand for [`Default::default()`] in struct-update position.
///
/// # Example
///
/// ```
/// use optic_utils::default;
///
/// #[derive(Default)]
/// struct Options {
///   verbose: bool,
///   depth: usize,
/// }
///
/// let options = Options {
///   depth: 3,
///   ..default()
/// };
/// # assert!(!options.verbose);
/// ```
#[inline(always)]
pub fn default<T: Default>() -> T {
    T::default()
}
