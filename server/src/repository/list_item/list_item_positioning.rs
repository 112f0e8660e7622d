//! List Item Positioning Operations
//!
//! Operations for managing wish positions within a list's custom order.
//! Each call runs in one `BEGIN IMMEDIATE` transaction: the neighbour reads,
//! any renumbering and the final writes commit together or not at all.

use async_trait::async_trait;
use rusqlite::TransactionBehavior;

use crate::domain::{DomainError, DomainResult, Placement, SortMode};
use crate::repository::list_repo::{load_list, update_sort_mode};
use super::list_item_repo::load_entries;
use super::ordering::{initialize_order, renumber, reposition};
use super::sqlite_rank_store::SqliteRankStore;

/// Trait for list item positioning operations
#[async_trait]
pub trait ListItemPositioningOperations {
    /// Move a wish between two neighbours (either may be absent at the ends).
    /// The list must be in custom order.
    async fn move_wish(
        &self,
        list_id: u32,
        wish_id: u32,
        after: Option<u32>,
        before: Option<u32>,
    ) -> DomainResult<Placement>;

    /// Rewrite all ranks with even gaps, keeping the current order
    async fn renumber_list(&self, list_id: u32) -> DomainResult<usize>;

    /// Freeze the order shown under `current` as the custom order and switch
    /// the list to `SortMode::Custom`
    async fn initialize_custom_order(&self, list_id: u32, current: SortMode) -> DomainResult<usize>;
}

#[async_trait]
impl ListItemPositioningOperations for super::list_item_repo::ListItemRepository {
    async fn move_wish(
        &self,
        list_id: u32,
        wish_id: u32,
        after: Option<u32>,
        before: Option<u32>,
    ) -> DomainResult<Placement> {
        let mut guard = self.conn.lock().await;
        let tx = guard.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let list = load_list(&tx, list_id)?
            .ok_or_else(|| DomainError::NotFound(format!("List {}", list_id)))?;
        if list.sort_mode != SortMode::Custom {
            return Err(DomainError::Conflict(format!(
                "List {} is sorted by {}; switch to custom order first",
                list_id,
                list.sort_mode.as_str()
            )));
        }

        let placement = reposition(&SqliteRankStore::new(&tx), list_id, wish_id, after, before)?;
        tx.commit()?;
        Ok(placement)
    }

    async fn renumber_list(&self, list_id: u32) -> DomainResult<usize> {
        let mut guard = self.conn.lock().await;
        let tx = guard.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let count = renumber(&SqliteRankStore::new(&tx), list_id)?;
        tx.commit()?;
        Ok(count)
    }

    async fn initialize_custom_order(&self, list_id: u32, current: SortMode) -> DomainResult<usize> {
        let mut guard = self.conn.lock().await;
        let tx = guard.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut entries = load_entries(&tx, list_id)?;
        current.sort_entries(&mut entries);
        let display_order: Vec<u32> = entries.iter().map(|e| e.wish.id).collect();

        let count = initialize_order(&SqliteRankStore::new(&tx), list_id, &display_order)?;
        update_sort_mode(&tx, list_id, SortMode::Custom)?;
        tx.commit()?;
        Ok(count)
    }
}
