//! Collection aliases for performance-critical topology maps.
//!
//! The topology indices are hash maps keyed by small integer tuples, so a fast
//! non-cryptographic hasher pays off. Do not use these with
//! attacker-controlled keys.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// `HashMap` using `rustc_hash::FxHasher` for fast hashing of integer keys.
pub type FastHashMap<K, V> = FxHashMap<K, V>;

/// `HashSet` using `rustc_hash::FxHasher`.
pub type FastHashSet<T> = FxHashSet<T>;

/// Small-optimized Vec with stack allocation for collections of at most `N`
/// elements and heap fallback beyond that. Used for cavity work-stacks and
/// polygon chains, which are almost always small.
pub type SmallBuffer<T, const N: usize> = SmallVec<[T; N]>;

/// Re-export of the Entry API for [`FastHashMap`].
pub use std::collections::hash_map::Entry;
