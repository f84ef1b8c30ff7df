//! Deterministic hasher states.
//!
//! `FixedHashState` wraps *foldhash* with a pinned seed, so a given input
//! always hashes to the same value across runs and builds.
//!
//! `NoOpHashState` passes an already-random `u64` straight through, for
//! keys such as `TypeId` that carry their own entropy.

use core::fmt::Debug;
use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

/// The pinned seed shared by every [`FixedHashState`].
const PINNED_SEED: FixedState = FixedState::with_seed(0x51C3_A8D4_7E96_0B2D);

/// A hasher whose output depends only on its input.
///
/// A type alias for [`foldhash::fast::FoldHasher`], created through
/// [`FixedHashState::build_hasher`].
pub type FixedHasher = FoldHasher<'static>;

/// Hash state with a pinned seed.
///
/// Useful wherever hash results have to be reproducible, such as lookup
/// tables whose layout should not vary between runs.
///
/// # Examples
///
/// ```
/// use core::hash::{Hash, Hasher, BuildHasher};
/// use optic_utils::hash::FixedHashState;
///
/// let hash = |n: u64| {
///     let mut hasher = FixedHashState.build_hasher();
///     n.hash(&mut hasher);
///     hasher.finish()
/// };
///
/// // Same input, same output, every time.
/// assert_eq!(hash(41), hash(41));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        PINNED_SEED.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// A pass-through hasher holding a single `u64`.
///
/// Created through [`NoOpHashState::build_hasher`].
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        // Folding in reverse with a byte-wide rotate keeps `write_u32(n)`
        // and `write_u64(n)` producing the same state for a single call.
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(u64::from(*byte));
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Hash state for keys that are already well distributed.
///
/// `write_u64` stores the value verbatim; the other `write` paths fold
/// bytes into the stored word without further mixing. Intended for keys
/// like `TypeId` where hashing again would only burn cycles.
///
/// # Examples
///
/// ```
/// use core::hash::{Hash, Hasher, BuildHasher};
/// use optic_utils::hash::NoOpHashState;
///
/// let mut hasher = NoOpHashState.build_hasher();
/// 7_u64.hash(&mut hasher);
/// assert_eq!(hasher.finish(), 7);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_state_is_deterministic() {
        let a = FixedHashState.hash_one("propeller");
        let b = FixedHashState.hash_one("propeller");
        assert_eq!(a, b);
    }

    #[test]
    fn noop_passes_u64_through() {
        assert_eq!(NoOpHashState.hash_one(0xDEAD_u64), 0xDEAD);
    }
}
