//! Wish List Repository
//!
//! Handles all list-level database operations. Membership and ordering live
//! in `list_item`.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{WishList, SortMode, DomainError, DomainResult};
use super::db::{now_millis, row_id};
use super::traits::Repository;

const LIST_COLUMNS: &str = "id, owner_id, name, sort_mode, created_at, updated_at";

pub struct WishListRepository {
    conn: Arc<Mutex<Connection>>,
}

impl WishListRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Switch the display order of a list.
    ///
    /// Switching to `custom` should go through
    /// `ListItemPositioningOperations::initialize_custom_order` instead, so
    /// the ranks match what the user was looking at.
    pub async fn set_sort_mode(&self, id: u32, sort_mode: SortMode) -> DomainResult<WishList> {
        let conn = self.conn.lock().await;
        update_sort_mode(&conn, id, sort_mode)?;
        load_list(&conn, id)?.ok_or_else(|| DomainError::NotFound(format!("List {}", id)))
    }
}

struct RawList {
    list: WishList,
    sort_mode: String,
}

fn row_to_raw(row: &Row<'_>) -> rusqlite::Result<RawList> {
    Ok(RawList {
        list: WishList {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            name: row.get(2)?,
            sort_mode: SortMode::default(),
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        },
        sort_mode: row.get(3)?,
    })
}

impl RawList {
    fn into_list(self) -> DomainResult<WishList> {
        let sort_mode = SortMode::parse(&self.sort_mode)
            .map_err(|e| DomainError::Internal(format!("List {}: {}", self.list.id, e)))?;
        Ok(WishList { sort_mode, ..self.list })
    }
}

pub(crate) fn load_list(conn: &Connection, id: u32) -> DomainResult<Option<WishList>> {
    let sql = format!("SELECT {} FROM wish_lists WHERE id = ?", LIST_COLUMNS);
    conn.query_row(&sql, params![id], row_to_raw)
        .optional()?
        .map(RawList::into_list)
        .transpose()
}

pub(crate) fn update_sort_mode(conn: &Connection, id: u32, sort_mode: SortMode) -> DomainResult<()> {
    let changed = conn.execute(
        "UPDATE wish_lists SET sort_mode = ?, updated_at = ? WHERE id = ?",
        params![sort_mode.as_str(), now_millis(), id],
    )?;
    if changed == 0 {
        return Err(DomainError::NotFound(format!("List {}", id)));
    }
    Ok(())
}

#[async_trait]
impl Repository<WishList> for WishListRepository {
    async fn create(&self, entity: &WishList) -> DomainResult<WishList> {
        entity.validate()?;
        let conn = self.conn.lock().await;

        let now = now_millis();
        conn.execute(
            "INSERT INTO wish_lists (owner_id, name, sort_mode, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
            params![entity.owner_id, entity.name.trim(), entity.sort_mode.as_str(), now, now],
        )?;

        let id = row_id(conn.last_insert_rowid())?;
        load_list(&conn, id)?
            .ok_or_else(|| DomainError::Internal(format!("List {} vanished after insert", id)))
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<WishList>> {
        let conn = self.conn.lock().await;
        load_list(&conn, id)
    }

    async fn list_by_owner(&self, owner_id: u32) -> DomainResult<Vec<WishList>> {
        let conn = self.conn.lock().await;

        let sql = format!(
            "SELECT {} FROM wish_lists WHERE owner_id = ? ORDER BY created_at, id",
            LIST_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let raws = stmt
            .query_map(params![owner_id], row_to_raw)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        raws.into_iter().map(RawList::into_list).collect()
    }

    /// Renames the list. The sort mode is changed with `set_sort_mode`.
    async fn update(&self, entity: &WishList) -> DomainResult<WishList> {
        entity.validate()?;
        let conn = self.conn.lock().await;

        let changed = conn.execute(
            "UPDATE wish_lists SET name = ?, updated_at = ? WHERE id = ?",
            params![entity.name.trim(), now_millis(), entity.id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("List {}", entity.id)));
        }

        load_list(&conn, entity.id)?
            .ok_or_else(|| DomainError::NotFound(format!("List {}", entity.id)))
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        let changed = conn.execute("DELETE FROM wish_lists WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("List {}", id)));
        }
        Ok(())
    }
}
