use super::tower::Peg;

/// Everything that can go wrong in the puzzle core.
///
/// The move variants mean the solver or executor broke the stacking
/// invariant; callers treat them as fatal. `DiskCount` is rejected input
/// that the UI normally prevents by clamping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HanoiError {
    #[error("invalid move: tower {peg} is empty")]
    EmptySource { peg: Peg },

    #[error("invalid move: expected disk {expected} on top of tower {peg}, found disk {found}")]
    DiskMismatch { peg: Peg, expected: usize, found: usize },

    #[error("invalid move: disk {disk} cannot rest on smaller disk {below} on tower {peg}")]
    IllegalPlacement { peg: Peg, disk: usize, below: usize },

    #[error("invalid move: source and destination are both tower {peg}")]
    SamePeg { peg: Peg },

    #[error("disk count {0} outside 1..=15")]
    DiskCount(u32),
}
