//! `Vec`-backed sequenced container with a bidirectional cursor.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::capability::{Capability, CapabilitySet};
use crate::container::{sequenced_eq, sequenced_hash, Category, Container, Listing};
use crate::cursor::SliceCursor;

/// Growable list. Equality, hashing and `Display` come from the container
/// protocol, so an `ArraySequence` equals any sequenced container visiting
/// the same elements in the same order.
///
/// # Examples
///
/// ```
/// use traverse_core::collections::ArraySequence;
/// use traverse_core::{Container, Cursor};
///
/// let seq: ArraySequence<&str> = ["a", "b"].into_iter().collect();
/// let mut cursor = seq.cursor();
/// assert_eq!(cursor.current(), Some(&"a"));
/// assert_eq!(cursor.next().current(), Some(&"b"));
/// ```
#[derive(Clone)]
pub struct ArraySequence<T> {
    elements: Vec<T>,
    capabilities: CapabilitySet,
}

impl<T> ArraySequence<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::from(Vec::new())
    }

    pub fn push(&mut self, value: T) {
        self.elements.push(value);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.elements.pop()
    }

    /// Inserts at `index`, handing the value back if `index > len`.
    ///
    /// # Errors
    ///
    /// Returns `Err(value)` when `index` is out of bounds.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), T> {
        if index > self.elements.len() {
            return Err(value);
        }
        self.elements.insert(index, value);
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting later elements.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.elements.len()).then(|| self.elements.remove(index))
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }
}

impl<T> Container for ArraySequence<T> {
    type Item = T;
    type Cursor<'a>
        = SliceCursor<'a, T>
    where
        Self: 'a;

    fn cursor(&self) -> SliceCursor<'_, T> {
        SliceCursor::new(&self.elements)
    }

    fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    fn category(&self) -> Category {
        Category::Sequenced
    }

    fn size(&self) -> usize {
        self.elements.len()
    }
}

impl<T> Default for ArraySequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for ArraySequence<T> {
    fn from(elements: Vec<T>) -> Self {
        Self {
            elements,
            capabilities: CapabilitySet::empty().with(Capability::REMOVE),
        }
    }
}

impl<T> FromIterator<T> for ArraySequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> Extend<T> for ArraySequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl<T: PartialEq> PartialEq for ArraySequence<T> {
    fn eq(&self, other: &Self) -> bool {
        sequenced_eq(self, other)
    }
}

impl<T: Eq> Eq for ArraySequence<T> {}

impl<T: Hash> Hash for ArraySequence<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(sequenced_hash(self));
    }
}

impl<T: fmt::Debug> fmt::Debug for ArraySequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.elements).finish()
    }
}

impl<T: fmt::Display> fmt::Display for ArraySequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Listing::new(self), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;

    #[test]
    fn fresh_cursor_on_first_element() {
        let seq: ArraySequence<i32> = vec![4, 5].into();
        let cursor = seq.cursor();
        assert!(cursor.is_first());
        assert_eq!(cursor.current(), Some(&4));
    }

    #[test]
    fn insert_and_remove_bounds() {
        let mut seq: ArraySequence<char> = "ac".chars().collect();
        assert!(seq.insert(1, 'b').is_ok());
        assert_eq!(seq.insert(9, 'z'), Err('z'));
        assert_eq!(seq.as_slice(), &['a', 'b', 'c']);
        assert_eq!(seq.remove(0), Some('a'));
        assert_eq!(seq.remove(5), None);
        assert_eq!(seq.get(1), Some(&'c'));
        assert_eq!(seq.size(), 2);
    }

    #[test]
    fn advertises_removal() {
        let seq = ArraySequence::<u8>::new();
        assert!(seq.capabilities().contains(&Capability::REMOVE));
        assert!(!seq.capabilities().contains(&Capability::BOUNDED));
    }

    #[test]
    fn equality_and_display_follow_protocol() {
        let mut a: ArraySequence<i32> = [1, 2].into_iter().collect();
        let b: ArraySequence<i32> = [1, 2].into_iter().collect();
        assert_eq!(a, b);
        a.push(3);
        assert_ne!(a, b);
        assert_eq!(a.to_string(), "[1, 2, 3]");
        a.clear();
        assert!(a.is_empty());
        assert_eq!(a.to_string(), "[]");
    }

    #[test]
    fn usable_as_hash_key() {
        let mut set = std::collections::HashSet::new();
        set.insert(ArraySequence::from(vec![1, 2]));
        assert!(set.contains(&ArraySequence::from(vec![1, 2])));
        assert!(!set.contains(&ArraySequence::from(vec![2, 1])));
    }

    #[test]
    fn elements_yields_in_order() {
        let mut seq = ArraySequence::new();
        seq.extend(["x", "y"]);
        assert_eq!(seq.pop(), Some("y"));
        let items: Vec<_> = seq.elements().collect();
        assert_eq!(items, vec!["x"]);
    }
}
