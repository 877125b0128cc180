//! Circular pagination over the profile catalog.
//!
//! The cursor is not stored anywhere: each rendered card embeds its own index
//! in the navigation buttons and the next index is recomputed on every press.
//! Indices coming back from Telegram may be tampered with, so every input is
//! normalized modulo the catalog length before use.

/// Navigation direction of a paging button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Callback payload prefix for this direction
    pub fn as_prefix(self) -> &'static str {
        match self {
            Direction::Forward => "next",
            Direction::Backward => "prev",
        }
    }
}

/// Normalizes any integer into `0..len`. Returns `None` for an empty catalog.
pub fn normalize(index: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    usize::try_from(index.rem_euclid(len)).ok()
}

/// Computes the index shown after pressing a paging button on `index`.
///
/// Wraps from the last profile to the first going forward and from the first
/// to the last going backward. Returns `None` when there is nothing to show.
pub fn advance(index: i64, direction: Direction, len: usize) -> Option<usize> {
    let current = normalize(index, len)?;
    let next = match direction {
        Direction::Forward => (current + 1) % len,
        Direction::Backward => (current + len - 1) % len,
    };
    Some(next)
}
