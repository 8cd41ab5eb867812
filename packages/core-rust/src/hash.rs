//! Deterministic element hashing and the two hash combination rules.
//!
//! Element hashes come from a 32-bit FNV-1a [`Hasher`] with no random seed,
//! so a container's hash is identical across runs and processes on the same
//! platform (unlike `RandomState`). `Hash` impls write integers in native
//! byte order and `usize` at native width, so hashes are not portable
//! between targets that differ in either. Sequenced
//! containers fold element hashes with `31 * h + e` starting from
//! [`SEQUENCED_SEED`]; unsequenced containers add them with wrapping
//! arithmetic starting from [`UNSEQUENCED_SEED`], which makes the result
//! independent of traversal order.

use std::hash::{Hash, Hasher};

/// FNV-1a offset basis (32-bit).
const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;

/// FNV-1a prime (32-bit).
const FNV_PRIME: u32 = 0x0100_0193;

/// Hash shared by every empty container, regardless of category.
pub const EMPTY_HASH: u32 = 1;

/// Seed of the order-sensitive fold.
pub const SEQUENCED_SEED: u32 = 1;

/// Seed of the order-insensitive fold.
pub const UNSEQUENCED_SEED: u32 = 0;

/// Multiplier of the order-sensitive fold.
const SEQUENCED_MULTIPLIER: u32 = 31;

/// 32-bit FNV-1a [`Hasher`] over the raw bytes fed to it.
///
/// # Examples
///
/// ```
/// use std::hash::Hasher;
/// use traverse_core::hash::Fnv1aHasher;
///
/// let mut hasher = Fnv1aHasher::new();
/// hasher.write(b"hello");
/// assert_eq!(hasher.finish32(), 1_335_831_723);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Fnv1aHasher {
    state: u32,
}

impl Fnv1aHasher {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: FNV_OFFSET_BASIS,
        }
    }

    /// The 32-bit digest; [`Hasher::finish`] widens this value.
    #[must_use]
    pub const fn finish32(&self) -> u32 {
        self.state
    }
}

impl Default for Fnv1aHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        u64::from(self.state)
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= u32::from(byte);
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }
}

/// Hashes one element with [`Fnv1aHasher`].
#[must_use]
pub fn element_hash<T: Hash + ?Sized>(element: &T) -> u32 {
    let mut hasher = Fnv1aHasher::new();
    element.hash(&mut hasher);
    hasher.finish32()
}

/// One step of the order-sensitive fold: `31 * acc + element`.
#[must_use]
pub const fn fold_sequenced(acc: u32, element: u32) -> u32 {
    acc.wrapping_mul(SEQUENCED_MULTIPLIER).wrapping_add(element)
}

/// One step of the order-insensitive fold: wrapping addition.
#[must_use]
pub const fn fold_unsequenced(acc: u32, element: u32) -> u32 {
    acc.wrapping_add(element)
}

/// Combines element hashes in order, seeded with [`SEQUENCED_SEED`].
#[must_use]
pub fn combine_sequenced(hashes: &[u32]) -> u32 {
    hashes.iter().fold(SEQUENCED_SEED, |acc, &h| fold_sequenced(acc, h))
}

/// Combines element hashes regardless of order, seeded with [`UNSEQUENCED_SEED`].
///
/// # Examples
///
/// ```
/// use traverse_core::hash::combine_unsequenced;
///
/// let a = combine_unsequenced(&[10, 20, 30]);
/// let b = combine_unsequenced(&[30, 10, 20]);
/// assert_eq!(a, b);
/// ```
#[must_use]
pub fn combine_unsequenced(hashes: &[u32]) -> u32 {
    hashes
        .iter()
        .fold(UNSEQUENCED_SEED, |acc, &h| fold_unsequenced(acc, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fnv(bytes: &[u8]) -> u32 {
        let mut hasher = Fnv1aHasher::new();
        hasher.write(bytes);
        hasher.finish32()
    }

    // ---- FNV-1a vectors ----

    #[test]
    fn fnv_known_vectors() {
        assert_eq!(fnv(b"hello"), 1_335_831_723);
        assert_eq!(fnv(b"key1"), 927_623_783);
        assert_eq!(fnv(b""), 2_166_136_261);
    }

    #[test]
    fn finish_widens_digest() {
        let mut hasher = Fnv1aHasher::default();
        hasher.write(b"hello");
        assert_eq!(hasher.finish(), 1_335_831_723);
    }

    #[test]
    fn element_hash_is_deterministic() {
        assert_eq!(element_hash("item"), element_hash("item"));
        assert_eq!(element_hash(&42_i64), element_hash(&42_i64));
        assert_ne!(element_hash("Item"), element_hash("item"));
    }

    #[test]
    fn element_hash_distinguishes_absent() {
        assert_ne!(element_hash(&None::<u8>), element_hash(&Some(0_u8)));
    }

    // ---- Folds ----

    #[test]
    fn sequenced_fold_matches_formula() {
        // ((1 * 31 + 7) * 31 + 11) = 1189
        assert_eq!(combine_sequenced(&[7, 11]), 1189);
        assert_eq!(combine_sequenced(&[]), SEQUENCED_SEED);
    }

    #[test]
    fn sequenced_fold_is_order_sensitive() {
        assert_ne!(combine_sequenced(&[1, 2, 3]), combine_sequenced(&[3, 2, 1]));
    }

    #[test]
    fn unsequenced_fold_is_order_insensitive() {
        let h1 = element_hash("first");
        let h2 = element_hash("second");
        let h3 = element_hash("third");
        assert_eq!(
            combine_unsequenced(&[h1, h2, h3]),
            combine_unsequenced(&[h3, h1, h2])
        );
    }

    #[test]
    fn unsequenced_fold_wraps() {
        let result = combine_unsequenced(&[0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF]);
        assert_eq!(result, 0xFFFF_FFFD);
    }

    #[test]
    fn sequenced_fold_wraps() {
        assert_eq!(fold_sequenced(u32::MAX, 0), u32::MAX.wrapping_mul(31));
    }
}
