//! Traverse Core: capability descriptors, the cursor protocol, and container
//! equality and hashing derived from canonical traversals.

pub mod capability;
pub mod collections;
pub mod conformance;
pub mod container;
pub mod cursor;
pub mod hash;
pub mod traversal;

pub use capability::{has_feature, Capability, CapabilityError, CapabilitySet};
pub use container::{Category, Container, Listing, ListingConfig};
pub use cursor::{Cursor, Position, SliceCursor};
pub use traversal::{traverse, try_traverse, CursorIter, Direction, Walk};

#[cfg(test)]
mod tests {
    #[test]
    fn crate_loads() {
        // Empty body: if this test runs, the crate compiles and loads.
    }
}
