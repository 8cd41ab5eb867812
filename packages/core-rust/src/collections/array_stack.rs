//! LIFO stack whose cursor only walks backward, from the top down.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::capability::{Capability, CapabilitySet, BACKWARD};
use crate::container::{sequenced_eq, sequenced_hash, Category, Container, Listing};
use crate::cursor::SliceCursor;

/// Stack backed by a `Vec` with the top at the end.
///
/// The cursor advertises only `end`, `previous` and `before`, so canonical traversal
/// (and therefore equality, hashing and `Display`) runs top to bottom.
/// A stack created with [`ArrayStack::bounded`] advertises `BOUNDED` and
/// rejects pushes beyond its limit.
#[derive(Clone)]
pub struct ArrayStack<T> {
    elements: Vec<T>,
    limit: Option<usize>,
    capabilities: CapabilitySet,
}

impl<T> ArrayStack<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            limit: None,
            capabilities: CapabilitySet::empty().with(Capability::REMOVE),
        }
    }

    /// Creates a stack holding at most `limit` elements. Storage grows on
    /// demand; the limit is only enforced by [`push`](ArrayStack::push).
    #[must_use]
    pub fn bounded(limit: usize) -> Self {
        Self {
            elements: Vec::new(),
            limit: Some(limit),
            capabilities: CapabilitySet::empty()
                .with(Capability::REMOVE)
                .with(Capability::BOUNDED),
        }
    }

    /// Pushes onto the top.
    ///
    /// # Errors
    ///
    /// Returns `Err(value)` when a bounded stack is full.
    pub fn push(&mut self, value: T) -> Result<(), T> {
        if self.limit.is_some_and(|limit| self.elements.len() >= limit) {
            return Err(value);
        }
        self.elements.push(value);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<T> {
        self.elements.pop()
    }

    /// The top element.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.elements.last()
    }

    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

impl<T> Container for ArrayStack<T> {
    type Item = T;
    type Cursor<'a>
        = SliceCursor<'a, T>
    where
        Self: 'a;

    fn cursor(&self) -> SliceCursor<'_, T> {
        SliceCursor::with_profile(&self.elements, &BACKWARD)
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

impl<T> Default for ArrayStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for ArrayStack<T> {
    fn eq(&self, other: &Self) -> bool {
        sequenced_eq(self, other)
    }
}

impl<T: Eq> Eq for ArrayStack<T> {}

impl<T: Hash> Hash for ArrayStack<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(sequenced_hash(self));
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayStack")
            .field("elements", &self.elements)
            .field("limit", &self.limit)
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for ArrayStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Listing::new(self), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;

    fn stack_of(items: &[i32]) -> ArrayStack<i32> {
        let mut stack = ArrayStack::new();
        for &item in items {
            stack.push(item).unwrap();
        }
        stack
    }

    #[test]
    fn lifo_order() {
        let mut stack = stack_of(&[1, 2]);
        assert_eq!(stack.peek(), Some(&2));
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn cursor_is_backward_only() {
        let stack = stack_of(&[1, 2, 3]);
        let mut cursor = stack.cursor();
        assert!(!cursor.can_next());
        assert!(cursor.can_previous() && cursor.can_end());
        // Sequenced: a fresh cursor sits on the first (bottom) element.
        assert!(cursor.is_first());
        cursor.end();
        assert_eq!(cursor.current(), Some(&3));
        assert!(cursor.is_last());
    }

    #[test]
    fn traversal_runs_top_down() {
        let stack = stack_of(&[1, 2, 3]);
        assert_eq!(stack.elements().collect::<Vec<_>>(), vec![3, 2, 1]);
        assert_eq!(stack.to_string(), "[3, 2, 1]");
    }

    #[test]
    fn bounded_stack_rejects_overflow() {
        let mut stack = ArrayStack::bounded(2);
        assert!(stack.push('a').is_ok());
        assert!(stack.push('b').is_ok());
        assert_eq!(stack.push('c'), Err('c'));
        assert_eq!(stack.size(), 2);
        assert_eq!(stack.limit(), Some(2));
        assert!(stack.capabilities().contains(&Capability::BOUNDED));

        stack.pop();
        assert!(stack.push('c').is_ok());
    }

    #[test]
    fn huge_limit_does_not_preallocate() {
        let mut stack = ArrayStack::<u64>::bounded(usize::MAX);
        assert_eq!(stack.limit(), Some(usize::MAX));
        assert!(stack.is_empty());
        assert!(stack.push(1).is_ok());
        assert_eq!(stack.peek(), Some(&1));
    }

    #[test]
    fn unbounded_stack_does_not_advertise_bound() {
        let stack = ArrayStack::<u8>::default();
        assert!(!stack.capabilities().contains(&Capability::BOUNDED));
        assert!(stack.capabilities().contains(&Capability::REMOVE));
    }

    #[test]
    fn equality_ignores_limit() {
        let mut bounded = ArrayStack::bounded(5);
        bounded.push(1).unwrap();
        assert_eq!(bounded, stack_of(&[1]));
    }
}
