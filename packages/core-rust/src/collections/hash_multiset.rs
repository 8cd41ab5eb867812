//! Unsequenced multiset storing occurrence counts, with a forward-only cursor.

use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::capability::{Capability, CapabilitySet, FORWARD};
use crate::container::{unsequenced_eq, unsequenced_hash, Category, Container, Listing};
use crate::cursor::{Cursor, Position};

/// Bag of elements where order is irrelevant and duplicates are counted.
///
/// Each distinct element is stored once with its multiplicity; the cursor
/// yields it that many times in a row. The traversal order is the map's
/// iteration order, which is stable while the multiset is not mutated.
#[derive(Clone)]
pub struct HashMultiset<T> {
    counts: HashMap<T, usize>,
    len: usize,
    capabilities: CapabilitySet,
}

impl<T: Eq + Hash> HashMultiset<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
            len: 0,
            capabilities: CapabilitySet::empty().with(Capability::REMOVE),
        }
    }

    /// Adds one occurrence.
    ///
    /// # Errors
    ///
    /// Returns `Err(value)` when the multiset already holds `usize::MAX`
    /// elements; nothing is inserted.
    pub fn insert(&mut self, value: T) -> Result<(), T> {
        self.insert_n(value, 1)
    }

    /// Adds `n` occurrences. `n == 0` is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Err(value)` when the total size or the element's count
    /// would overflow `usize`; the multiset is left unchanged.
    pub fn insert_n(&mut self, value: T, n: usize) -> Result<(), T> {
        if n == 0 {
            return Ok(());
        }
        let Some(len) = self.len.checked_add(n) else {
            return Err(value);
        };
        let Some(count) = self.count_of(&value).checked_add(n) else {
            return Err(value);
        };
        self.counts.insert(value, count);
        self.len = len;
        Ok(())
    }

    /// Removes one occurrence. Returns `false` if the element was absent.
    pub fn remove_one(&mut self, value: &T) -> bool {
        let Some(count) = self.counts.get_mut(value) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.counts.remove(value);
        }
        self.len -= 1;
        true
    }

    /// Multiplicity of `value`.
    #[must_use]
    pub fn count_of(&self, value: &T) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Number of distinct elements.
    #[must_use]
    pub fn distinct_len(&self) -> usize {
        self.counts.len()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
        self.len = 0;
    }
}

impl<T> Container for HashMultiset<T> {
    type Item = T;
    type Cursor<'a>
        = MultisetCursor<'a, T>
    where
        Self: 'a;

    fn cursor(&self) -> MultisetCursor<'_, T> {
        MultisetCursor::new(&self.counts, self.len)
    }

    fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    fn category(&self) -> Category {
        Category::Unsequenced
    }

    fn size(&self) -> usize {
        self.len
    }
}

impl<T: Eq + Hash> Default for HashMultiset<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> FromIterator<T> for HashMultiset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Eq + Hash> Extend<T> for HashMultiset<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            if self.insert(value).is_err() {
                tracing::warn!(len = self.len, "multiset is full, dropping remaining elements");
                return;
            }
        }
    }
}

impl<T: Eq + Hash + Clone> PartialEq for HashMultiset<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && unsequenced_eq(self, other)
    }
}

impl<T: Eq + Hash + Clone> Eq for HashMultiset<T> {}

impl<T: Hash> Hash for HashMultiset<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(unsequenced_hash(self));
    }
}

impl<T: fmt::Debug> fmt::Debug for HashMultiset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.counts.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for HashMultiset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Listing::new(self), f)
    }
}

// ---------------------------------------------------------------------------
// MultisetCursor
// ---------------------------------------------------------------------------

/// Current distinct element and the occurrences left to yield for it,
/// the current one included.
#[derive(Debug, Clone, Copy)]
struct Occurrence<'a, T> {
    element: &'a T,
    remaining: usize,
}

/// Forward-only cursor over a [`HashMultiset`].
#[derive(Debug)]
pub struct MultisetCursor<'a, T> {
    counts: &'a HashMap<T, usize>,
    entries: hash_map::Iter<'a, T, usize>,
    position: Position<Occurrence<'a, T>>,
    ordinal: usize,
    len: usize,
}

impl<'a, T> MultisetCursor<'a, T> {
    fn new(counts: &'a HashMap<T, usize>, len: usize) -> Self {
        let mut cursor = Self {
            counts,
            entries: counts.iter(),
            position: Position::Undetermined,
            ordinal: 0,
            len,
        };
        cursor.rewind();
        cursor
    }

    fn rewind(&mut self) {
        self.entries = self.counts.iter();
        self.ordinal = 0;
        self.position = Self::occurrence(self.entries.next());
    }

    fn occurrence(entry: Option<(&'a T, &'a usize)>) -> Position<Occurrence<'a, T>> {
        match entry {
            Some((element, &remaining)) => Position::Positioned(Occurrence { element, remaining }),
            None => Position::Undetermined,
        }
    }
}

impl<T> Cursor for MultisetCursor<'_, T> {
    type Item = T;

    fn capabilities(&self) -> &CapabilitySet {
        &FORWARD
    }

    fn start(&mut self) -> &mut Self {
        self.rewind();
        self
    }

    fn previous(&mut self) -> &mut Self {
        self
    }

    fn next(&mut self) -> &mut Self {
        if let Position::Positioned(occurrence) = &mut self.position {
            self.ordinal += 1;
            if occurrence.remaining > 1 {
                occurrence.remaining -= 1;
            } else {
                self.position = Self::occurrence(self.entries.next());
            }
        }
        self
    }

    fn end(&mut self) -> &mut Self {
        self
    }

    fn current(&self) -> Option<&T> {
        self.position.handle().map(|occurrence| occurrence.element)
    }

    fn is_first(&self) -> bool {
        self.position.is_determined() && self.ordinal == 0
    }

    fn is_last(&self) -> bool {
        self.position.is_determined() && self.ordinal + 1 == self.len
    }
}
