//! Hash containers and hasher states, built over *hashbrown* and *foldhash*.

// -----------------------------------------------------------------------------
// Modules

mod hasher;

pub mod hash_map;
pub mod hash_set;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher};
pub use hasher::{NoOpHashState, NoOpHasher};

pub use hash_map::HashMap;
pub use hash_set::HashSet;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
