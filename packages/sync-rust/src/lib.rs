//! Traverse Sync: a nullable value container guarded by a reader/writer lock.

pub mod nullable;

pub use nullable::ConcurrentNullable;

#[cfg(test)]
mod tests {
    #[test]
    fn crate_loads() {
        // Empty body: if this test runs, the crate compiles and loads.
    }
}
