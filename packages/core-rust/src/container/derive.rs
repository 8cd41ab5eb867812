//! Equality, hashing and string form derived from canonical traversals.
//!
//! # Equality
//!
//! Containers are only compared when their sizes match. Sequenced containers
//! are walked in lockstep and compared position by position; unsequenced
//! containers compare the multiplicity of every element. Containers of
//! different categories are never equal, empty ones included.
//!
//! # Hashing
//!
//! Every empty container hashes to [`EMPTY_HASH`]. Otherwise sequenced
//! containers fold element hashes with `31 * h + e` (seed 1) and unsequenced
//! containers sum them (seed 0).

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use super::{Category, Container};
use crate::hash::{
    element_hash, fold_sequenced, fold_unsequenced, EMPTY_HASH, SEQUENCED_SEED, UNSEQUENCED_SEED,
};
use crate::traversal::{traverse, try_traverse, Walk};

// ---------------------------------------------------------------------------
// Equality
// ---------------------------------------------------------------------------

/// Position-by-position equality of two canonical traversals.
#[must_use]
pub fn sequenced_eq<A, B>(a: &A, b: &B) -> bool
where
    A: Container,
    B: Container,
    A::Item: PartialEq<B::Item>,
{
    if a.size() != b.size() {
        return false;
    }
    let mut left_cursor = a.cursor();
    let mut right_cursor = b.cursor();
    let mut left = Walk::begin(&mut left_cursor);
    let mut right = Walk::begin(&mut right_cursor);
    loop {
        match (left.current(), right.current()) {
            (Some(x), Some(y)) => {
                if x != y {
                    return false;
                }
            }
            (None, None) => return true,
            _ => return false,
        }
        left.advance();
        right.advance();
    }
}

/// Multiplicity equality: every element occurs equally often in both.
#[must_use]
pub fn unsequenced_eq<A, B>(a: &A, b: &B) -> bool
where
    A: Container,
    B: Container<Item = A::Item>,
    A::Item: Eq + Hash + Clone,
{
    if a.size() != b.size() {
        return false;
    }
    let mut balance: HashMap<A::Item, usize> = HashMap::new();
    traverse(&mut a.cursor(), |item| {
        *balance.entry(item.clone()).or_insert(0) += 1;
    });
    // Sizes match, so consuming every element of `b` leaves the balance at zero.
    try_traverse(&mut b.cursor(), |item| match balance.get_mut(item) {
        Some(n) if *n > 0 => {
            *n -= 1;
            Ok(())
        }
        _ => Err(()),
    })
    .is_ok()
}

/// Category-aware equality. Mismatched categories are unequal.
#[must_use]
pub fn container_eq<A, B>(a: &A, b: &B) -> bool
where
    A: Container,
    B: Container<Item = A::Item>,
    A::Item: Eq + Hash + Clone,
{
    match (a.category(), b.category()) {
        (Category::Sequenced, Category::Sequenced) => sequenced_eq(a, b),
        (Category::Unsequenced, Category::Unsequenced) => unsequenced_eq(a, b),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

fn fold_hash<C, F>(container: &C, seed: u32, fold: F) -> u32
where
    C: Container,
    C::Item: Hash,
    F: Fn(u32, u32) -> u32,
{
    let mut acc = seed;
    let mut visited = 0_usize;
    traverse(&mut container.cursor(), |item| {
        acc = fold(acc, element_hash(item));
        visited += 1;
    });
    if visited == 0 {
        EMPTY_HASH
    } else {
        acc
    }
}

/// Order-sensitive hash: `31 * h + e` over the canonical traversal.
#[must_use]
pub fn sequenced_hash<C>(container: &C) -> u32
where
    C: Container,
    C::Item: Hash,
{
    fold_hash(container, SEQUENCED_SEED, fold_sequenced)
}

/// Order-insensitive hash: wrapping sum of element hashes.
#[must_use]
pub fn unsequenced_hash<C>(container: &C) -> u32
where
    C: Container,
    C::Item: Hash,
{
    fold_hash(container, UNSEQUENCED_SEED, fold_unsequenced)
}

/// Category-aware hash.
#[must_use]
pub fn container_hash<C>(container: &C) -> u32
where
    C: Container,
    C::Item: Hash,
{
    match container.category() {
        Category::Sequenced => sequenced_hash(container),
        Category::Unsequenced => unsequenced_hash(container),
    }
}

// ---------------------------------------------------------------------------
// String form
// ---------------------------------------------------------------------------

/// Delimiters used by [`Listing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingConfig {
    pub open: &'static str,
    pub separator: &'static str,
    pub close: &'static str,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            open: "[",
            separator: ", ",
            close: "]",
        }
    }
}

/// [`Display`](fmt::Display) adapter rendering a canonical traversal.
///
/// ```
/// use traverse_core::collections::ArraySequence;
/// use traverse_core::container::Listing;
///
/// let seq: ArraySequence<i32> = [1, 2, 3].into_iter().collect();
/// assert_eq!(Listing::new(&seq).to_string(), "[1, 2, 3]");
/// ```
#[derive(Debug)]
pub struct Listing<'c, C> {
    container: &'c C,
    config: ListingConfig,
}

impl<'c, C: Container> Listing<'c, C> {
    #[must_use]
    pub fn new(container: &'c C) -> Self {
        Self::with_config(container, ListingConfig::default())
    }

    #[must_use]
    pub fn with_config(container: &'c C, config: ListingConfig) -> Self {
        Self { container, config }
    }
}

impl<C> fmt::Display for Listing<'_, C>
where
    C: Container,
    C::Item: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config.open)?;
        let mut first = true;
        try_traverse(&mut self.container.cursor(), |item| {
            if !first {
                f.write_str(self.config.separator)?;
            }
            first = false;
            write!(f, "{item}")
        })?;
        f.write_str(self.config.close)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
