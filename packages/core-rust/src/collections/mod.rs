//! Reference storage collaborators honouring the cursor protocol.
//!
//! Each collection picks a different cursor profile so the canonical loop is
//! exercised in both directions:
//!
//! - [`ArraySequence`]: sequenced, bidirectional
//! - [`ArrayStack`]: sequenced, backward-only (top of stack first)
//! - [`HashMultiset`]: unsequenced, forward-only

pub mod array_sequence;
pub mod array_stack;
pub mod hash_multiset;

pub use array_sequence::ArraySequence;
pub use array_stack::ArrayStack;
pub use hash_multiset::{HashMultiset, MultisetCursor};
