//! List View Store
//!
//! Local copy of one list's entries in display order. Moves are applied
//! optimistically and then confirmed or rolled back once the server answers.

use fractional_rank::{compute_rank, needs_renumber, neighbours, RankError, SEED_RANK};
use crate::error::ClientError;
use crate::models::{ListEntry, Placement};

/// A move that has been shown locally but not yet acknowledged by the server
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMove {
    pub wish_id: u32,
    /// Index the wish occupied before the move
    pub from_index: usize,
    pub previous_rank: f64,
    /// Rank shown until the server answers
    pub tentative_rank: f64,
    /// Neighbour above the new slot (None = moved to top)
    pub after: Option<u32>,
    /// Neighbour below the new slot (None = moved to bottom)
    pub before: Option<u32>,
    /// Neighbours were too close for a reliable local rank
    pub precision_warning: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ListStore {
    list_id: u32,
    entries: Vec<ListEntry>,
    stale: bool,
}

impl ListStore {
    pub fn new(list_id: u32, entries: Vec<ListEntry>) -> Self {
        let mut store = Self { list_id, entries: Vec::new(), stale: false };
        store.replace(entries);
        store
    }

    pub fn list_id(&self) -> u32 {
        self.list_id
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    /// Wish ids in display order
    pub fn ids(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.wish.id).collect()
    }

    /// True once the server reported a renumber; ranks held locally are outdated
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Swap in a fresh server snapshot
    pub fn replace(&mut self, mut entries: Vec<ListEntry>) {
        entries.sort_by(|a, b| a.sort_order.total_cmp(&b.sort_order).then(a.seq.cmp(&b.seq)));
        self.entries = entries;
        self.stale = false;
    }

    fn index_of(&self, wish_id: u32) -> Option<usize> {
        self.entries.iter().position(|e| e.wish.id == wish_id)
    }

    /// Move a wish to `to_index` (clamped to the end) and give it a tentative rank.
    ///
    /// A neighbour holding a non-finite rank is corrupt data; the move is refused
    /// and the store is left as it was.
    ///
    /// The local rank is only for display; the server decides the stored value.
    /// When the neighbours are too close to split, the wish still lands in the
    /// requested slot and the server is left to renumber.
    pub fn move_to(&mut self, wish_id: u32, to_index: usize) -> Result<PendingMove, ClientError> {
        let from_index = self.index_of(wish_id).ok_or(ClientError::UnknownWish(wish_id))?;
        let mut entry = self.entries.remove(from_index);
        let previous_rank = entry.sort_order;

        let to_index = to_index.min(self.entries.len());
        let ranks: Vec<f64> = self.entries.iter().map(|e| e.sort_order).collect();
        let (prev, next) = neighbours(&ranks, to_index);
        let after = to_index.checked_sub(1).map(|i| self.entries[i].wish.id);
        let before = self.entries.get(to_index).map(|e| e.wish.id);

        let mut precision_warning = matches!((prev, next), (Some(p), Some(n)) if needs_renumber(p, n));
        let tentative_rank = match compute_rank(prev, next) {
            Ok(rank) => rank,
            Err(e @ RankError::NonFinite(_)) => {
                self.entries.insert(from_index, entry);
                return Err(e.into());
            }
            Err(e) => {
                precision_warning = true;
                log::warn!("No local rank for wish {} in list {}: {}", wish_id, self.list_id, e);
                prev.or(next).unwrap_or(SEED_RANK)
            }
        };
        if precision_warning {
            log::warn!(
                "Neighbours of wish {} in list {} are too close, server will renumber",
                wish_id,
                self.list_id
            );
        }

        entry.sort_order = tentative_rank;
        self.entries.insert(to_index, entry);

        Ok(PendingMove {
            wish_id,
            from_index,
            previous_rank,
            tentative_rank,
            after,
            before,
            precision_warning,
        })
    }

    /// Adopt the rank the server stored. Returns true when the whole list must be refetched.
    pub fn confirm(&mut self, placement: &Placement) -> bool {
        if let Some(i) = self.index_of(placement.wish_id) {
            self.entries[i].sort_order = placement.sort_order;
        }
        if placement.renumbered {
            self.stale = true;
        }
        self.stale
    }

    /// Undo a move the server refused
    pub fn rollback(&mut self, pending: &PendingMove) {
        let Some(i) = self.index_of(pending.wish_id) else {
            return;
        };
        let mut entry = self.entries.remove(i);
        entry.sort_order = pending.previous_rank;
        let at = pending.from_index.min(self.entries.len());
        self.entries.insert(at, entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Wish;

    fn entry(id: u32, sort_order: f64) -> ListEntry {
        ListEntry {
            wish: Wish {
                id,
                owner_id: 1,
                title: format!("wish {}", id),
                url: None,
                price: None,
                notes: None,
                created_at: 0,
                updated_at: 0,
            },
            sort_order,
            seq: id as i64,
            added_at: 0,
        }
    }

    fn store() -> ListStore {
        ListStore::new(7, vec![entry(3, 3.0), entry(1, 1.0), entry(2, 2.0)])
    }

    #[test]
    fn new_sorts_by_rank() {
        assert_eq!(store().ids(), vec![1, 2, 3]);
    }

    #[test]
    fn ties_fall_back_to_insertion_order() {
        let store = ListStore::new(1, vec![entry(9, 1.0), entry(4, 1.0)]);
        assert_eq!(store.ids(), vec![4, 9]);
    }

    #[test]
    fn move_between() {
        let mut store = store();
        let pending = store.move_to(3, 1).unwrap();

        assert_eq!(store.ids(), vec![1, 3, 2]);
        assert_eq!(pending.tentative_rank, 1.5);
        assert_eq!(pending.after, Some(1));
        assert_eq!(pending.before, Some(2));
        assert_eq!(pending.from_index, 2);
        assert!(!pending.precision_warning);
    }

    #[test]
    fn move_to_top_and_bottom() {
        let mut store = store();
        let top = store.move_to(2, 0).unwrap();
        assert_eq!(top.tentative_rank, 0.0);
        assert_eq!((top.after, top.before), (None, Some(1)));

        let bottom = store.move_to(2, 99).unwrap();
        assert_eq!(bottom.tentative_rank, 4.0);
        assert_eq!((bottom.after, bottom.before), (Some(3), None));
        assert_eq!(store.ids(), vec![1, 3, 2]);
    }

    #[test]
    fn unknown_wish() {
        let mut store = store();
        assert!(matches!(store.move_to(42, 0), Err(ClientError::UnknownWish(42))));
    }

    #[test]
    fn close_neighbours_warn_but_still_move() {
        let mut store = ListStore::new(1, vec![entry(1, 1.0), entry(2, 1.0 + 1e-9), entry(3, 5.0)]);
        let pending = store.move_to(3, 1).unwrap();

        assert!(pending.precision_warning);
        assert_eq!(store.ids(), vec![1, 3, 2]);
    }

    #[test]
    fn tied_neighbours_keep_requested_slot() {
        let mut store = ListStore::new(1, vec![entry(1, 2.0), entry(2, 2.0), entry(3, 5.0)]);
        let pending = store.move_to(3, 1).unwrap();

        assert!(pending.precision_warning);
        assert_eq!(pending.tentative_rank, 2.0);
        assert_eq!(store.ids(), vec![1, 3, 2]);
    }

    #[test]
    fn corrupt_neighbour_rank_refuses_move() {
        let mut store = ListStore::new(1, vec![entry(1, 1.0), entry(2, f64::INFINITY), entry(3, 5.0)]);
        let before = store.ids();

        let err = store.move_to(1, 2).unwrap_err();

        assert!(matches!(err, ClientError::Rank(RankError::NonFinite(_))));
        assert_eq!(store.ids(), before);
        assert_eq!(store.entries()[0].sort_order, 1.0);
    }

    #[test]
    fn rollback_restores_slot_and_rank() {
        let mut store = store();
        let pending = store.move_to(1, 2).unwrap();
        assert_eq!(store.ids(), vec![2, 3, 1]);

        store.rollback(&pending);

        assert_eq!(store.ids(), vec![1, 2, 3]);
        assert_eq!(store.entries()[0].sort_order, 1.0);
    }

    #[test]
    fn confirm_adopts_server_rank() {
        let mut store = store();
        store.move_to(3, 0).unwrap();

        let refetch = store.confirm(&Placement { wish_id: 3, sort_order: -5.0, renumbered: false });

        assert!(!refetch);
        assert_eq!(store.entries()[0].sort_order, -5.0);
    }

    #[test]
    fn renumbered_placement_marks_stale() {
        let mut store = store();
        store.move_to(3, 0).unwrap();

        assert!(store.confirm(&Placement { wish_id: 3, sort_order: 0.0, renumbered: true }));
        assert!(store.is_stale());

        store.replace(vec![entry(3, 0.0), entry(1, 10.0), entry(2, 20.0)]);
        assert!(!store.is_stale());
        assert_eq!(store.ids(), vec![3, 1, 2]);
    }
}
