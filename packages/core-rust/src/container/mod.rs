//! Container protocol built on top of the cursor.
//!
//! A [`Container`] exposes a cursor factory, a capability set and an ordering
//! [`Category`]. Size, emptiness, equality, hashing and the string form are
//! all derived from a canonical traversal (see [`derive`]), so storage
//! collaborators only have to provide a conforming cursor.

pub mod derive;

use crate::capability::CapabilitySet;
use crate::cursor::Cursor;
use crate::traversal::{self, CursorIter};

pub use derive::{
    container_eq, container_hash, sequenced_eq, sequenced_hash, unsequenced_eq, unsequenced_hash,
    Listing, ListingConfig,
};

/// Whether element order is part of a container's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Lists, stacks, sequenced maps: order-sensitive equality and hash.
    Sequenced,
    /// Sets, multisets, unordered maps: order-insensitive equality and hash.
    Unsequenced,
}

/// Externally observable traversal surface of a container.
///
/// Structural mutation of a container requires `&mut self`, while a cursor
/// borrows `&self`; a cursor therefore cannot outlive a mutation.
pub trait Container {
    /// Element type.
    type Item;

    /// Cursor type produced by [`cursor`](Container::cursor).
    type Cursor<'a>: Cursor<Item = Self::Item>
    where
        Self: 'a;

    /// Creates a fresh cursor. Over a non-empty [`Category::Sequenced`]
    /// container it must be positioned on the first element.
    fn cursor(&self) -> Self::Cursor<'_>;

    /// Structural and mutability properties of the container.
    fn capabilities(&self) -> &CapabilitySet;

    fn category(&self) -> Category;

    /// Number of elements. The default counts a canonical traversal;
    /// collaborators that cache their size should override it.
    fn size(&self) -> usize {
        traversal::count(&mut self.cursor())
    }

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Clones of every element, in canonical traversal order.
    fn elements(&self) -> CursorIter<Self::Cursor<'_>>
    where
        Self::Item: Clone,
    {
        CursorIter::new(self.cursor())
    }
}
