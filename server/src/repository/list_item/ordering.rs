//! Ordering Routines
//!
//! Rank allocation and renumbering, written against the `RankStore` port.
//! Atomicity is the store's concern: the SQLite store runs inside one
//! transaction, so a failed call leaves no partial writes behind.

use fractional_rank::{compute_rank, needs_renumber, renumbered_ranks, RankError};

use crate::domain::{DomainError, DomainResult, Placement};
use crate::repository::traits::RankStore;

/// Rank for a wish appended at the end of a list
pub fn append_rank<S: RankStore + ?Sized>(store: &S, list_id: u32) -> DomainResult<f64> {
    match compute_rank(store.max_rank(list_id)?, None) {
        Ok(rank) => Ok(rank),
        Err(RankError::Exhausted { .. }) => {
            renumber(store, list_id)?;
            Ok(compute_rank(store.max_rank(list_id)?, None)?)
        }
        Err(err) => Err(err.into()),
    }
}

/// Move `wish_id` into the slot between `after` and `before`.
///
/// When the neighbours are too close to bisect, the list is renumbered and
/// the neighbours are read again before the rank is computed. This happens
/// at most once per call.
pub fn reposition<S: RankStore + ?Sized>(
    store: &S,
    list_id: u32,
    wish_id: u32,
    after: Option<u32>,
    before: Option<u32>,
) -> DomainResult<Placement> {
    if after == Some(wish_id) || before == Some(wish_id) {
        return Err(DomainError::InvalidInput(format!(
            "Wish {} cannot be placed next to itself",
            wish_id
        )));
    }
    if after.is_some() && after == before {
        return Err(DomainError::InvalidInput("Neighbours must be different wishes".into()));
    }
    if store.member_rank(list_id, wish_id)?.is_none() {
        return Err(DomainError::NotFound(format!("Wish {} in list {}", wish_id, list_id)));
    }

    let (mut prev, mut next) = store.neighbour_ranks(list_id, after, before)?;
    ensure_adjacent(store, list_id, wish_id, after, before)?;
    let mut renumbered = false;

    if let (Some(p), Some(n)) = (prev, next) {
        if p <= n && needs_renumber(p, n) {
            log::warn!(
                "List {}: gap between {} and {} exhausted, renumbering",
                list_id, p, n
            );
            renumber(store, list_id)?;
            renumbered = true;
            (prev, next) = store.neighbour_ranks(list_id, after, before)?;
        }
    }

    let rank = match compute_rank(prev, next) {
        Ok(rank) => rank,
        Err(RankError::Exhausted { .. }) if !renumbered => {
            renumber(store, list_id)?;
            renumbered = true;
            (prev, next) = store.neighbour_ranks(list_id, after, before)?;
            compute_rank(prev, next)?
        }
        Err(err) => return Err(err.into()),
    };

    store.write_rank(list_id, wish_id, rank)?;
    log::debug!("List {}: wish {} moved to rank {}", list_id, wish_id, rank);

    Ok(Placement {
        wish_id,
        sort_order: rank,
        renumbered,
    })
}

/// `after` and `before` must name one slot of the current order with the
/// moving wish left out: `after` directly followed by `before`, `None` only at
/// the list ends. Anything else means the caller's view of the list is stale.
fn ensure_adjacent<S: RankStore + ?Sized>(
    store: &S,
    list_id: u32,
    wish_id: u32,
    after: Option<u32>,
    before: Option<u32>,
) -> DomainResult<()> {
    let order: Vec<u32> = store
        .ordered_members(list_id)?
        .into_iter()
        .map(|(id, _)| id)
        .filter(|&id| id != wish_id)
        .collect();

    let expected_before = match after {
        None => order.first().copied(),
        Some(after_id) => match order.iter().position(|&id| id == after_id) {
            Some(i) => order.get(i + 1).copied(),
            None => return Err(DomainError::NotFound(format!("Wish {} in list {}", after_id, list_id))),
        },
    };

    if expected_before == before {
        Ok(())
    } else {
        Err(DomainError::Conflict(format!(
            "List {} is out of date: {} is not directly followed by {}",
            list_id,
            slot_name(after, "start"),
            slot_name(before, "end"),
        )))
    }
}

fn slot_name(id: Option<u32>, end: &str) -> String {
    match id {
        Some(id) => format!("wish {}", id),
        None => format!("the list {}", end),
    }
}

/// Rewrite every rank as `index * RENUMBER_GAP`, keeping the current order.
///
/// Returns the number of members renumbered.
pub fn renumber<S: RankStore + ?Sized>(store: &S, list_id: u32) -> DomainResult<usize> {
    let members = store.ordered_members(list_id)?;
    let ranks: Vec<(u32, f64)> = members
        .iter()
        .map(|&(wish_id, _)| wish_id)
        .zip(renumbered_ranks(members.len()))
        .collect();

    store.write_all_ranks(list_id, &ranks)?;
    log::info!("List {}: renumbered {} items", list_id, ranks.len());
    Ok(ranks.len())
}

/// Assign sequential ranks following `display_order`.
///
/// `display_order` must name every member of the list exactly once.
pub fn initialize_order<S: RankStore + ?Sized>(
    store: &S,
    list_id: u32,
    display_order: &[u32],
) -> DomainResult<usize> {
    let mut members: Vec<u32> = store
        .ordered_members(list_id)?
        .into_iter()
        .map(|(wish_id, _)| wish_id)
        .collect();
    let mut requested = display_order.to_vec();
    members.sort_unstable();
    requested.sort_unstable();
    if members != requested {
        return Err(DomainError::Conflict(format!(
            "List {} changed while its order was being initialized",
            list_id
        )));
    }

    let ranks: Vec<(u32, f64)> = display_order
        .iter()
        .copied()
        .zip(renumbered_ranks(display_order.len()))
        .collect();
    store.write_all_ranks(list_id, &ranks)?;
    log::info!("List {}: custom order initialized for {} items", list_id, ranks.len());
    Ok(ranks.len())
}
