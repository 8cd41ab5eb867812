//! The canonical traversal loop.
//!
//! Every derived container operation (size, equality, hashing, string form)
//! visits elements through this loop, so any capability subset a cursor
//! supports yields a terminating, visit-once traversal:
//!
//! ```text
//! if can_next:  start(); while is_after():  visit(current); next()
//! else:         end();   while is_before(): visit(current); previous()
//! ```

use std::iter::FusedIterator;

use crate::cursor::Cursor;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Direction the canonical loop walks a cursor in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `start()` then `next()` until exhausted.
    Forward,
    /// `end()` then `previous()` until exhausted.
    Backward,
}

impl Direction {
    /// Forward whenever the cursor can step forward, backward otherwise.
    #[must_use]
    pub fn of<C: Cursor>(cursor: &C) -> Self {
        if cursor.can_next() {
            Self::Forward
        } else {
            Self::Backward
        }
    }

    fn begin<C: Cursor>(self, cursor: &mut C) {
        match self {
            Self::Forward => cursor.start(),
            Self::Backward => cursor.end(),
        };
    }

    fn has_current<C: Cursor>(self, cursor: &C) -> bool {
        match self {
            Self::Forward => cursor.is_after(),
            Self::Backward => cursor.is_before(),
        }
    }

    fn advance<C: Cursor>(self, cursor: &mut C) {
        match self {
            Self::Forward => Cursor::next(cursor),
            Self::Backward => Cursor::previous(cursor),
        };
    }
}

// ---------------------------------------------------------------------------
// Walk
// ---------------------------------------------------------------------------

/// The canonical loop as a stepping adapter, for callers that drive two
/// traversals in lockstep.
#[derive(Debug)]
pub struct Walk<'c, C> {
    cursor: &'c mut C,
    direction: Direction,
}

impl<'c, C: Cursor> Walk<'c, C> {
    /// Picks a direction and positions the cursor at its first visit.
    pub fn begin(cursor: &'c mut C) -> Self {
        let direction = Direction::of(cursor);
        direction.begin(cursor);
        Self { cursor, direction }
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The loop guard: `is_after()` forward, `is_before()` backward.
    #[must_use]
    pub fn has_current(&self) -> bool {
        self.direction.has_current(&*self.cursor)
    }

    /// The element to visit, or `None` once the walk is exhausted.
    #[must_use]
    pub fn current(&self) -> Option<&C::Item> {
        if self.has_current() {
            self.cursor.current()
        } else {
            None
        }
    }

    /// `(at entry end, at exit end)`: `(is_first, is_last)` forward,
    /// `(is_last, is_first)` backward.
    #[must_use]
    pub fn boundary_flags(&self) -> (bool, bool) {
        let (first, last) = (self.cursor.is_first(), self.cursor.is_last());
        match self.direction {
            Direction::Forward => (first, last),
            Direction::Backward => (last, first),
        }
    }

    /// Steps once in the walk's direction.
    pub fn advance(&mut self) {
        self.direction.advance(&mut *self.cursor);
    }
}

// ---------------------------------------------------------------------------
// Drivers
// ---------------------------------------------------------------------------

/// Visits every element once, in canonical order.
pub fn traverse<C, F>(cursor: &mut C, mut visit: F)
where
    C: Cursor,
    F: FnMut(&C::Item),
{
    let mut walk = Walk::begin(cursor);
    while let Some(item) = walk.current() {
        visit(item);
        walk.advance();
    }
}

/// Visits every element once, stopping at the first failing visit.
///
/// # Errors
///
/// Returns the visitor's error unchanged; remaining elements are not visited.
pub fn try_traverse<C, F, E>(cursor: &mut C, mut visit: F) -> Result<(), E>
where
    C: Cursor,
    F: FnMut(&C::Item) -> Result<(), E>,
{
    let mut walk = Walk::begin(cursor);
    let mut visited = 0_usize;
    while let Some(item) = walk.current() {
        if let Err(err) = visit(item) {
            tracing::debug!(visited, "traversal aborted by visitor");
            return Err(err);
        }
        visited += 1;
        walk.advance();
    }
    Ok(())
}

/// Number of elements a canonical traversal visits.
pub fn count<C: Cursor>(cursor: &mut C) -> usize {
    let mut n = 0;
    traverse(cursor, |_| n += 1);
    n
}

// ---------------------------------------------------------------------------
// CursorIter
// ---------------------------------------------------------------------------

/// Owns a cursor and yields clones of its elements in canonical order.
#[derive(Debug)]
pub struct CursorIter<C> {
    cursor: C,
    direction: Direction,
    begun: bool,
}

impl<C: Cursor> CursorIter<C> {
    #[must_use]
    pub fn new(cursor: C) -> Self {
        let direction = Direction::of(&cursor);
        Self {
            cursor,
            direction,
            begun: false,
        }
    }
}

impl<C> Iterator for CursorIter<C>
where
    C: Cursor,
    C::Item: Clone,
{
    type Item = C::Item;

    fn next(&mut self) -> Option<C::Item> {
        if self.begun {
            self.direction.advance(&mut self.cursor);
        } else {
            self.direction.begin(&mut self.cursor);
            self.begun = true;
        }
        if self.direction.has_current(&self.cursor) {
            self.cursor.current().cloned()
        } else {
            None
        }
    }
}

impl<C> FusedIterator for CursorIter<C>
where
    C: Cursor,
    C::Item: Clone,
{
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
