//! A [`HashSet`] alias defaulting to the workspace hasher.

use crate::hash::FixedHashState;

/// [`hashbrown::HashSet`] with [`FixedHashState`] as the default state.
///
/// Construct with `HashSet::default()`; `HashSet::new()` is only
/// available with hashbrown's default hasher.
///
/// # Examples
///
/// ```
/// use optic_utils::hash::HashSet;
///
/// let mut set: HashSet<&str> = HashSet::default();
/// set.insert("starboard");
/// assert!(set.contains("starboard"));
/// ```
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;
