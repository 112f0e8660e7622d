//! Fractional Rank
//!
//! Sort keys for user-ordered collections. Moving an element computes a new
//! rank between its future neighbours, so no other element is rewritten.
//! Repeated bisection of the same gap eventually runs out of floating-point
//! precision; [`needs_renumber`] detects that and [`renumbered_rank`] gives
//! the evenly spaced ranks a collection is rewritten with.
//!
//! The server is the authority for stored ranks. Clients call the same
//! functions to show a tentative position before the server answers.

use std::fmt;

/// Rank given to the first element of an empty collection
pub const SEED_RANK: f64 = 1.0;

/// Distance from the current head/tail when inserting at either end
pub const BOUNDARY_STEP: f64 = 1.0;

/// Gaps smaller than this are considered exhausted
pub const PRECISION_THRESHOLD: f64 = 1e-6;

/// Spacing between ranks after a renumber
pub const RENUMBER_GAP: f64 = 10.0;

pub type RankResult<T> = Result<T, RankError>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RankError {
    /// NaN or infinite rank
    NonFinite(f64),
    /// Neighbours supplied with `prev >= next`
    OutOfOrder { prev: f64, next: f64 },
    /// No representable value strictly between the bounds
    Exhausted { prev: Option<f64>, next: Option<f64> },
}

impl fmt::Display for RankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankError::NonFinite(value) => write!(f, "rank {} is not finite", value),
            RankError::OutOfOrder { prev, next } => {
                write!(f, "neighbour ranks out of order: {} >= {}", prev, next)
            }
            RankError::Exhausted { prev, next } => {
                write!(f, "no room for a rank between {:?} and {:?}", prev, next)
            }
        }
    }
}

impl std::error::Error for RankError {}

/// Reject NaN and infinities
pub fn validate_rank(rank: f64) -> RankResult<f64> {
    if rank.is_finite() {
        Ok(rank)
    } else {
        Err(RankError::NonFinite(rank))
    }
}

/// Compute a rank for the slot between `prev` and `next`.
///
/// `None` on either side means the slot is at that end of the collection.
/// The result is strictly greater than `prev` and strictly less than `next`.
pub fn compute_rank(prev: Option<f64>, next: Option<f64>) -> RankResult<f64> {
    let prev = prev.map(validate_rank).transpose()?;
    let next = next.map(validate_rank).transpose()?;

    let rank = match (prev, next) {
        (None, None) => return Ok(SEED_RANK),
        (None, Some(next)) => next - BOUNDARY_STEP,
        (Some(prev), None) => prev + BOUNDARY_STEP,
        (Some(prev), Some(next)) => {
            if prev >= next {
                return Err(RankError::OutOfOrder { prev, next });
            }
            midpoint(prev, next)
        }
    };

    let above_prev = prev.map_or(true, |p| rank > p);
    let below_next = next.map_or(true, |n| rank < n);
    if rank.is_finite() && above_prev && below_next {
        Ok(rank)
    } else {
        Err(RankError::Exhausted { prev, next })
    }
}

fn midpoint(a: f64, b: f64) -> f64 {
    let mid = (a + b) / 2.0;
    if mid.is_finite() {
        mid
    } else {
        a / 2.0 + b / 2.0
    }
}

/// True when two adjacent ranks are too close to bisect again
pub fn needs_renumber(a: f64, b: f64) -> bool {
    (b - a).abs() < PRECISION_THRESHOLD
}

/// Rank assigned to position `index` by a renumber
pub fn renumbered_rank(index: usize) -> f64 {
    index as f64 * RENUMBER_GAP
}

/// Ranks for a whole collection of `count` elements after a renumber
pub fn renumbered_ranks(count: usize) -> impl Iterator<Item = f64> {
    (0..count).map(renumbered_rank)
}

/// Neighbour ranks around slot `index` of an ascending rank sequence.
///
/// Slot `0` is before the first element, slot `ranks.len()` after the last.
/// Indexes past the end are treated as the tail.
pub fn neighbours(ranks: &[f64], index: usize) -> (Option<f64>, Option<f64>) {
    let index = index.min(ranks.len());
    let prev = index.checked_sub(1).map(|i| ranks[i]);
    let next = ranks.get(index).copied();
    (prev, next)
}
