//! A [`HashMap`] alias defaulting to the workspace hasher.

use crate::hash::FixedHashState;

/// [`hashbrown::HashMap`] with [`FixedHashState`] as the default state.
///
/// Construct with `HashMap::default()` or
/// [`with_capacity_and_hasher`](hashbrown::HashMap::with_capacity_and_hasher);
/// `HashMap::new()` is only available with hashbrown's default hasher.
///
/// # Examples
///
/// ```
/// use optic_utils::hash::HashMap;
///
/// let mut map: HashMap<&str, i32> = HashMap::default();
/// map.insert("left", 1);
/// assert_eq!(map.get("left"), Some(&1));
/// ```
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;
