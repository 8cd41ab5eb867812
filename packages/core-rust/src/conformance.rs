//! Invariant checks storage collaborators can run against their containers.
//!
//! [`check_container`] exercises a container's cursor the way the derived
//! operations do and reports the first protocol violation it finds.

use crate::capability::CapabilityError;
use crate::container::{Category, Container};
use crate::cursor::Cursor;
use crate::traversal::{Direction, Walk};

/// Protocol violations detected by [`check_container`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("cursor capabilities are invalid: {0}")]
    Capability(#[from] CapabilityError),
    #[error("cursor over an empty container is determined after `{operation}`")]
    DeterminedOverEmpty { operation: &'static str },
    #[error("fresh cursor over a sequenced container is not on the first element")]
    NotAtFirst,
    #[error("initial position of an unsequenced container is not stable")]
    UnstableInitialPosition,
    #[error("container reports size {size} but traversal visited {visited}")]
    SizeMismatch { size: usize, visited: usize },
    #[error("`{flag}` flag wrong at visit {index} of {size}")]
    BoundaryFlag {
        flag: &'static str,
        index: usize,
        size: usize,
    },
}

/// Summary of a container that passed [`check_container`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub size: usize,
    pub category: Category,
    pub direction: Direction,
}

/// Runs every protocol check against `container`.
///
/// # Errors
///
/// Returns the first [`Violation`] found.
pub fn check_container<C>(container: &C) -> Result<Report, Violation>
where
    C: Container,
    C::Item: PartialEq,
{
    let fresh = container.cursor();
    fresh.capabilities().validate_cursor()?;
    tracing::trace!("direction symmetry holds");

    let size = container.size();
    if size == 0 {
        check_empty(container)?;
    } else {
        check_initial_position(container)?;
    }

    let direction = Direction::of(&fresh);
    let (visited, boundary) = check_walk(container, size);
    if visited != size {
        return Err(Violation::SizeMismatch { size, visited });
    }
    if let Some(violation) = boundary {
        return Err(violation);
    }
    tracing::trace!(size, "traversal complete");

    Ok(Report {
        size,
        category: container.category(),
        direction,
    })
}

fn is_determined<C: Cursor>(cursor: &C) -> bool {
    cursor.is_current()
        || cursor.current().is_some()
        || cursor.is_first()
        || cursor.is_last()
        || cursor.is_before()
        || cursor.is_after()
}

fn ensure_undetermined<K: Cursor>(cursor: &K, operation: &'static str) -> Result<(), Violation> {
    if is_determined(cursor) {
        return Err(Violation::DeterminedOverEmpty { operation });
    }
    Ok(())
}

fn check_empty<C: Container>(container: &C) -> Result<(), Violation> {
    let mut cursor = container.cursor();
    ensure_undetermined(&cursor, "cursor")?;
    cursor.start();
    ensure_undetermined(&cursor, "start")?;
    cursor.next();
    ensure_undetermined(&cursor, "next")?;
    cursor.end();
    ensure_undetermined(&cursor, "end")?;
    cursor.previous();
    ensure_undetermined(&cursor, "previous")?;
    tracing::trace!("empty container keeps cursor undetermined");
    Ok(())
}

fn check_initial_position<C>(container: &C) -> Result<(), Violation>
where
    C: Container,
    C::Item: PartialEq,
{
    let first = container.cursor();
    match container.category() {
        Category::Sequenced => {
            if !(first.is_current() && first.is_first()) {
                return Err(Violation::NotAtFirst);
            }
        }
        Category::Unsequenced => {
            // Two fresh cursors must agree on where they begin.
            let second = container.cursor();
            let initial = first.current();
            let stable = initial.is_some() && initial == second.current();
            if !stable {
                return Err(Violation::UnstableInitialPosition);
            }
        }
    }
    tracing::trace!("initial position holds");
    Ok(())
}

/// Walks the canonical loop, visiting at most `size + 1` elements.
/// Returns the visit count and the first boundary-flag violation.
fn check_walk<C: Container>(container: &C, size: usize) -> (usize, Option<Violation>) {
    let mut cursor = container.cursor();
    let mut walk = Walk::begin(&mut cursor);
    // Forward walks enter on `first`, backward walks on `last`.
    let (entry_flag, exit_flag) = match walk.direction() {
        Direction::Forward => ("first", "last"),
        Direction::Backward => ("last", "first"),
    };
    let mut index = 0;
    let mut violation = None;
    while walk.has_current() && index <= size {
        if violation.is_none() {
            let (at_entry, at_exit) = walk.boundary_flags();
            let flag = if at_entry != (index == 0) {
                Some(entry_flag)
            } else if at_exit != (index + 1 == size) {
                Some(exit_flag)
            } else {
                None
            };
            violation = flag.map(|flag| Violation::BoundaryFlag { flag, index, size });
        }
        index += 1;
        walk.advance();
    }
    (index, violation)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
