//! List Item Repository - Membership Operations
//!
//! SQLite-backed membership of wishes in lists.
//! Ordering operations are in `list_item_positioning`.

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{ListEntry, ListItem, SortMode, DomainError, DomainResult};
use crate::repository::db::now_millis;
use crate::repository::wish_repo::row_to_wish;
use super::ordering::append_rank;
use super::sqlite_rank_store::SqliteRankStore;

/// SQLite implementation of list membership
pub struct ListItemRepository {
    pub(super) conn: Arc<Mutex<Connection>>,
}

impl ListItemRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Entries of a list in the given display order
    pub async fn entries(&self, list_id: u32, sort_mode: SortMode) -> DomainResult<Vec<ListEntry>> {
        let conn = self.conn.lock().await;
        let mut entries = load_entries(&conn, list_id)?;
        sort_mode.sort_entries(&mut entries);
        Ok(entries)
    }

    pub async fn find(&self, list_id: u32, wish_id: u32) -> DomainResult<Option<ListItem>> {
        let conn = self.conn.lock().await;
        let item = conn
            .query_row(
                "SELECT list_id, wish_id, sort_order, id, added_at FROM list_items WHERE list_id = ? AND wish_id = ?",
                params![list_id, wish_id],
                |row| {
                    Ok(ListItem {
                        list_id: row.get(0)?,
                        wish_id: row.get(1)?,
                        sort_order: row.get(2)?,
                        seq: row.get(3)?,
                        added_at: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(item)
    }

    /// Add a wish at the end of the list's custom order
    pub async fn add_wish(&self, list_id: u32, wish_id: u32) -> DomainResult<ListEntry> {
        let mut guard = self.conn.lock().await;
        let tx = guard.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM list_items WHERE list_id = ? AND wish_id = ?)",
            params![list_id, wish_id],
            |row| row.get(0),
        )?;
        if exists {
            return Err(DomainError::Conflict(format!(
                "Wish {} is already in list {}",
                wish_id, list_id
            )));
        }

        let rank = append_rank(&SqliteRankStore::new(&tx), list_id)?;
        tx.execute(
            "INSERT INTO list_items (list_id, wish_id, sort_order, added_at) VALUES (?, ?, ?, ?)",
            params![list_id, wish_id, rank, now_millis()],
        )?;
        let seq = tx.last_insert_rowid();

        let entry = load_entries(&tx, list_id)?
            .into_iter()
            .find(|e| e.seq == seq)
            .ok_or_else(|| DomainError::Internal(format!("Wish {} vanished after insert", wish_id)))?;
        tx.commit()?;

        log::info!("List {}: added wish {} at rank {}", list_id, wish_id, rank);
        Ok(entry)
    }

    /// Remove a wish from a list. The wish itself is kept.
    pub async fn remove_wish(&self, list_id: u32, wish_id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "DELETE FROM list_items WHERE list_id = ? AND wish_id = ?",
            params![list_id, wish_id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Wish {} in list {}", wish_id, list_id)));
        }
        Ok(())
    }
}

/// All entries of a list joined with their wishes, unsorted
pub(super) fn load_entries(conn: &Connection, list_id: u32) -> DomainResult<Vec<ListEntry>> {
    let mut stmt = conn.prepare(
        "SELECT w.id, w.owner_id, w.title, w.url, w.price, w.notes, w.created_at, w.updated_at,
                li.sort_order, li.id, li.added_at
         FROM list_items li
         JOIN wishes w ON w.id = li.wish_id
         WHERE li.list_id = ?",
    )?;
    let entries = stmt
        .query_map(params![list_id], |row| {
            Ok(ListEntry {
                wish: row_to_wish(row)?,
                sort_order: row.get(8)?,
                seq: row.get(9)?,
                added_at: row.get(10)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(entries)
}
