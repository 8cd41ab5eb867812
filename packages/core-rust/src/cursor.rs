//! Cursor protocol: a single-position, capability-gated traversal handle.
//!
//! A cursor is either [`Position::Undetermined`] or positioned on exactly one
//! element of its container. Directional moves are gated by the cursor's
//! [`CapabilitySet`]: a move whose capability is absent is a no-op, and so is
//! any move on an undetermined cursor other than `start`/`end`.
//!
//! # Boundaries
//!
//! Stepping past either end of the sequence (`next` on the last element,
//! `previous` on the first) walks the cursor off the sequence and leaves it
//! undetermined. `start`/`end` position it again. This is what lets the
//! canonical traversal loop in [`crate::traversal`] terminate.
//!
//! # Identity
//!
//! Cursors are mutable, single-use handles. They deliberately implement
//! neither `PartialEq` nor `Hash`: two cursors over the same container and
//! position are still two different cursors.

use crate::capability::{Capability, CapabilitySet, CapabilityError, BIDIRECTIONAL};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Whether a cursor references an element, and which one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position<H> {
    /// No current element.
    Undetermined,
    /// Positioned on the element identified by the handle.
    Positioned(H),
}

impl<H> Position<H> {
    #[must_use]
    pub const fn is_determined(&self) -> bool {
        matches!(self, Self::Positioned(_))
    }

    /// The handle, if positioned.
    #[must_use]
    pub const fn handle(&self) -> Option<&H> {
        match self {
            Self::Undetermined => None,
            Self::Positioned(handle) => Some(handle),
        }
    }
}

// ---------------------------------------------------------------------------
// Cursor trait
// ---------------------------------------------------------------------------

/// Capability-aware, bidirectional traversal handle over one container.
///
/// Moves return `&mut Self` so calls can be chained:
/// `cursor.start().next().next()`.
pub trait Cursor {
    /// Element type the cursor yields.
    type Item;

    /// The traversal capabilities of this cursor. Must satisfy
    /// [`CapabilitySet::validate_cursor`].
    fn capabilities(&self) -> &CapabilitySet;

    /// Moves to the first element. No-op without `START` or over an empty container.
    fn start(&mut self) -> &mut Self;

    /// Steps towards the first element. No-op without `PREVIOUS` or when undetermined.
    fn previous(&mut self) -> &mut Self;

    /// Steps towards the last element. No-op without `NEXT` or when undetermined.
    fn next(&mut self) -> &mut Self;

    /// Moves to the last element. No-op without `END` or over an empty container.
    fn end(&mut self) -> &mut Self;

    /// The current element, or `None` when undetermined.
    fn current(&self) -> Option<&Self::Item>;

    /// Positioned on the first element of the sequence.
    fn is_first(&self) -> bool;

    /// Positioned on the last element of the sequence.
    fn is_last(&self) -> bool;

    /// Positioned on any element.
    fn is_current(&self) -> bool {
        self.current().is_some()
    }

    /// A backward walk from here still has an element to visit.
    ///
    /// Profiles that walk backward advertise [`Capability::BEFORE`]. The
    /// query itself is answerable on every cursor, so the backward loop
    /// guard also works for custom sets that omit the token.
    fn is_before(&self) -> bool {
        self.is_current()
    }

    /// A forward walk from here still has an element to visit.
    fn is_after(&self) -> bool {
        self.is_current()
    }

    fn can_start(&self) -> bool {
        self.capabilities().contains(&Capability::START)
    }

    fn can_previous(&self) -> bool {
        self.capabilities().contains(&Capability::PREVIOUS)
    }

    fn can_next(&self) -> bool {
        self.capabilities().contains(&Capability::NEXT)
    }

    fn can_end(&self) -> bool {
        self.capabilities().contains(&Capability::END)
    }
}

// ---------------------------------------------------------------------------
// SliceCursor
// ---------------------------------------------------------------------------

/// Index-based cursor over a slice, for storage collaborators backed by
/// contiguous memory.
///
/// A fresh cursor over a non-empty slice is positioned on index 0.
#[derive(Debug)]
pub struct SliceCursor<'a, T> {
    elements: &'a [T],
    capabilities: &'a CapabilitySet,
    position: Position<usize>,
}

impl<'a, T> SliceCursor<'a, T> {
    /// Creates a cursor with a predefined, already-valid profile.
    pub(crate) fn with_profile(elements: &'a [T], capabilities: &'a CapabilitySet) -> Self {
        let position = if elements.is_empty() {
            Position::Undetermined
        } else {
            Position::Positioned(0)
        };
        Self {
            elements,
            capabilities,
            position,
        }
    }

    /// Creates a bidirectional cursor.
    #[must_use]
    pub fn new(elements: &'a [T]) -> Self {
        Self::with_profile(elements, &BIDIRECTIONAL)
    }

    /// Creates a cursor restricted to `capabilities`.
    ///
    /// # Errors
    ///
    /// Returns a [`CapabilityError`] if the set violates direction symmetry.
    pub fn with_capabilities(
        elements: &'a [T],
        capabilities: &'a CapabilitySet,
    ) -> Result<Self, CapabilityError> {
        capabilities.validate_cursor()?;
        Ok(Self::with_profile(elements, capabilities))
    }

    /// Index of the current element.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.position.handle().copied()
    }

    fn last_index(&self) -> Option<usize> {
        self.elements.len().checked_sub(1)
    }
}

impl<T> Cursor for SliceCursor<'_, T> {
    type Item = T;

    fn capabilities(&self) -> &CapabilitySet {
        self.capabilities
    }

    fn start(&mut self) -> &mut Self {
        if self.can_start() && !self.elements.is_empty() {
            self.position = Position::Positioned(0);
        }
        self
    }

    fn previous(&mut self) -> &mut Self {
        if !self.can_previous() {
            return self;
        }
        if let Position::Positioned(index) = self.position {
            self.position = match index.checked_sub(1) {
                Some(prev) => Position::Positioned(prev),
                None => Position::Undetermined,
            };
        }
        self
    }

    fn next(&mut self) -> &mut Self {
        if !self.can_next() {
            return self;
        }
        if let Position::Positioned(index) = self.position {
            self.position = if Some(index) == self.last_index() {
                Position::Undetermined
            } else {
                Position::Positioned(index + 1)
            };
        }
        self
    }

    fn end(&mut self) -> &mut Self {
        if self.can_end() {
            if let Some(last) = self.last_index() {
                self.position = Position::Positioned(last);
            }
        }
        self
    }

    fn current(&self) -> Option<&T> {
        self.index().and_then(|index| self.elements.get(index))
    }

    fn is_first(&self) -> bool {
        self.index() == Some(0)
    }

    fn is_last(&self) -> bool {
        self.index().is_some() && self.index() == self.last_index()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{BACKWARD, FORWARD};

    // ---- Position ----

    #[test]
    fn position_handle() {
        assert_eq!(Position::<usize>::Undetermined.handle(), None);
        assert_eq!(Position::Positioned(3).handle(), Some(&3));
        assert!(Position::Positioned(()).is_determined());
    }

    // ---- Empty container ----

    #[test]
    fn empty_slice_stays_undetermined() {
        let empty: [i32; 0] = [];
        let mut cursor = SliceCursor::new(&empty);
        cursor.start().next().end().previous();
        assert!(!cursor.is_current());
        assert!(!cursor.is_first());
        assert!(!cursor.is_last());
        assert!(!cursor.is_before());
        assert!(!cursor.is_after());
        assert_eq!(cursor.current(), None);
    }

    // ---- Positioning ----

    #[test]
    fn fresh_cursor_is_on_first_element() {
        let data = [10, 20, 30];
        let cursor = SliceCursor::new(&data);
        assert!(cursor.is_first());
        assert_eq!(cursor.current(), Some(&10));
    }

    #[test]
    fn chained_moves() {
        let data = [10, 20, 30];
        let mut cursor = SliceCursor::new(&data);
        cursor.next().next();
        assert!(cursor.is_last());
        assert_eq!(cursor.current(), Some(&30));
        cursor.previous();
        assert_eq!(cursor.current(), Some(&20));
        cursor.end().start();
        assert_eq!(cursor.current(), Some(&10));
    }

    #[test]
    fn single_element_is_first_and_last() {
        let data = ["only"];
        let cursor = SliceCursor::new(&data);
        assert!(cursor.is_first());
        assert!(cursor.is_last());
    }

    #[test]
    fn walking_off_either_end_undetermines() {
        let data = [1, 2];
        let mut cursor = SliceCursor::new(&data);
        cursor.end().next();
        assert!(!cursor.is_current());
        // Undetermined: further steps are no-ops.
        cursor.next().previous();
        assert!(!cursor.is_current());

        cursor.start().previous();
        assert!(!cursor.is_current());
        cursor.end();
        assert_eq!(cursor.current(), Some(&2));
    }

    // ---- Capability gating ----

    #[test]
    fn forward_cursor_ignores_backward_moves() {
        let data = [1, 2, 3];
        let mut cursor = SliceCursor::with_capabilities(&data, &FORWARD).unwrap();
        cursor.next();
        cursor.previous();
        assert_eq!(cursor.current(), Some(&2));
        cursor.end();
        assert_eq!(cursor.current(), Some(&2));
        assert!(cursor.can_start() && cursor.can_next());
        assert!(!cursor.can_previous() && !cursor.can_end());
    }

    #[test]
    fn backward_cursor_ignores_forward_moves() {
        let data = [1, 2, 3];
        let mut cursor = SliceCursor::with_capabilities(&data, &BACKWARD).unwrap();
        cursor.end().previous();
        cursor.next().start();
        assert_eq!(cursor.current(), Some(&2));
        assert!(cursor.can_end() && cursor.can_previous());
        assert!(!cursor.can_start() && !cursor.can_next());
    }

    #[test]
    fn invalid_profile_is_rejected() {
        let data = [1];
        let only_start = CapabilitySet::empty().with(Capability::START);
        let result = SliceCursor::with_capabilities(&data, &only_start);
        assert_eq!(result.err(), Some(CapabilityError::NoDirection));
    }
}
