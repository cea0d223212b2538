//! Map types shared across the bridge.
//!
//! The default build hashes with `ahash` through `hashbrown`; enabling the
//! `std-hash` feature swaps both the unordered and the ordered maps back to
//! the standard library hasher.

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::hash_map::RandomState;
    pub use std::collections::{HashMap, HashSet};
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use ahash::RandomState;
    pub use hashbrown::{HashMap, HashSet};
}

/// Insertion-ordered map; member and callback tables keep declaration order.
pub type OrderedMap<K, V> = indexmap::IndexMap<K, V, map::RandomState>;

/// Insertion-ordered set used by the delegation tables.
pub type OrderedSet<K> = indexmap::IndexSet<K, map::RandomState>;
