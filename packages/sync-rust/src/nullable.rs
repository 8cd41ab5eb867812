//! Thread-safe container for a single optional value.
//!
//! [`ConcurrentNullable`] guards one `Option<T>` slot with a
//! [`parking_lot::RwLock`]. Plain reads and writes take the lock for the
//! duration of the access; compound operations (`update`, `if_present`,
//! `if_absent`) run the caller's closure while still holding it, so the
//! presence check and the use of the value observe the same state.
//!
//! # Lock discipline
//!
//! - Readers (`get`, `read`, `if_present`, `if_absent`) share the lock.
//! - Writers (`set`, `replace`, `take`, `update`, `try_update`) exclude
//!   everyone else.
//! - Guards are released on every exit path, unwinding included. `parking_lot`
//!   locks do not poison, so a panicking closure leaves the container usable.
//! - The lock is not reentrant: a closure must not call back into the same
//!   container. Closures should be short; there is no timeout.

use std::fmt;
use std::mem;

use parking_lot::RwLock;

/// A nullable value behind a reader/writer lock.
///
/// # Examples
///
/// ```
/// use traverse_sync::ConcurrentNullable;
///
/// let counter = ConcurrentNullable::new();
/// counter.update(|n: Option<&u32>| Some(n.map_or(1, |n| n + 1)));
/// counter.update(|n| Some(n.map_or(1, |n| n + 1)));
/// assert_eq!(counter.get(), Some(2));
/// ```
pub struct ConcurrentNullable<T> {
    slot: RwLock<Option<T>>,
}

impl<T> ConcurrentNullable<T> {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Creates a container holding `value`.
    #[must_use]
    pub fn with_value(value: T) -> Self {
        Self {
            slot: RwLock::new(Some(value)),
        }
    }

    /// Snapshot of the current value.
    #[must_use]
    pub fn get(&self) -> Option<T>
    where
        T: Clone,
    {
        self.slot.read().clone()
    }

    /// Runs `f` against the current value under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        let guard = self.slot.read();
        f(guard.as_ref())
    }

    /// Overwrites the slot. The previous value is dropped after the lock is released.
    pub fn set(&self, value: Option<T>) {
        drop(self.replace(value));
    }

    /// Overwrites the slot and returns the previous value.
    pub fn replace(&self, value: Option<T>) -> Option<T> {
        mem::replace(&mut *self.slot.write(), value)
    }

    /// Empties the slot and returns what it held.
    pub fn take(&self) -> Option<T> {
        self.slot.write().take()
    }

    pub fn clear(&self) {
        self.set(None);
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Replaces the value with `transform(current)` under the write lock.
    ///
    /// No other thread observes the slot between the read and the store.
    pub fn update(&self, transform: impl FnOnce(Option<&T>) -> Option<T>) {
        let previous = {
            let mut guard = self.slot.write();
            let next = transform(guard.as_ref());
            mem::replace(&mut *guard, next)
        };
        drop(previous);
    }

    /// Fallible [`update`](ConcurrentNullable::update). The slot is left
    /// untouched when `transform` fails.
    ///
    /// # Errors
    ///
    /// Returns the transform's error unchanged.
    pub fn try_update<E>(
        &self,
        transform: impl FnOnce(Option<&T>) -> Result<Option<T>, E>,
    ) -> Result<(), E> {
        let mut guard = self.slot.write();
        let outcome = transform(guard.as_ref());
        let previous = match outcome {
            Ok(next) => mem::replace(&mut *guard, next),
            Err(err) => {
                drop(guard);
                tracing::debug!("update transform failed, value unchanged");
                return Err(err);
            }
        };
        drop(guard);
        drop(previous);
        Ok(())
    }

    /// Runs `action` on the value if one is present, under the read lock.
    pub fn if_present<R>(&self, action: impl FnOnce(&T) -> R) -> Option<R> {
        let guard = self.slot.read();
        guard.as_ref().map(action)
    }

    /// Runs `action` if the slot is empty, under the read lock.
    pub fn if_absent<R>(&self, action: impl FnOnce() -> R) -> Option<R> {
        let guard = self.slot.read();
        guard.is_none().then(action)
    }

    /// Consumes the container, returning the value.
    #[must_use]
    pub fn into_inner(self) -> Option<T> {
        self.slot.into_inner()
    }
}

impl<T> Default for ConcurrentNullable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Option<T>> for ConcurrentNullable<T> {
    fn from(value: Option<T>) -> Self {
        Self {
            slot: RwLock::new(value),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ConcurrentNullable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `RwLock`'s Debug uses try_read and prints `<locked>` when contended.
        f.debug_struct("ConcurrentNullable")
            .field("slot", &self.slot)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
