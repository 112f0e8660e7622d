//! Wish Repository
//!
//! SQLite-backed implementation for Wish CRUD operations.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{Wish, DomainError, DomainResult};
use super::db::{now_millis, row_id};
use super::traits::Repository;

const WISH_COLUMNS: &str = "id, owner_id, title, url, price, notes, created_at, updated_at";

/// SQLite implementation of Wish repository
pub struct WishRepository {
    conn: Arc<Mutex<Connection>>,
}

impl WishRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

pub(crate) fn row_to_wish(row: &Row<'_>) -> rusqlite::Result<Wish> {
    Ok(Wish {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        url: row.get(3)?,
        price: row.get(4)?,
        notes: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn load_wish(conn: &Connection, id: u32) -> DomainResult<Option<Wish>> {
    let sql = format!("SELECT {} FROM wishes WHERE id = ?", WISH_COLUMNS);
    Ok(conn.query_row(&sql, params![id], row_to_wish).optional()?)
}

#[async_trait]
impl Repository<Wish> for WishRepository {
    async fn create(&self, entity: &Wish) -> DomainResult<Wish> {
        entity.validate()?;
        let conn = self.conn.lock().await;

        let now = now_millis();
        conn.execute(
            "INSERT INTO wishes (owner_id, title, url, price, notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                entity.owner_id,
                entity.title.trim(),
                entity.url,
                entity.price,
                entity.notes,
                now,
                now
            ],
        )?;

        let id = row_id(conn.last_insert_rowid())?;
        load_wish(&conn, id)?
            .ok_or_else(|| DomainError::Internal(format!("Wish {} vanished after insert", id)))
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Wish>> {
        let conn = self.conn.lock().await;
        load_wish(&conn, id)
    }

    async fn list_by_owner(&self, owner_id: u32) -> DomainResult<Vec<Wish>> {
        let conn = self.conn.lock().await;

        let sql = format!(
            "SELECT {} FROM wishes WHERE owner_id = ? ORDER BY created_at DESC, id DESC",
            WISH_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let wishes = stmt
            .query_map(params![owner_id], row_to_wish)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(wishes)
    }

    async fn update(&self, entity: &Wish) -> DomainResult<Wish> {
        entity.validate()?;
        let conn = self.conn.lock().await;

        let changed = conn.execute(
            "UPDATE wishes SET title = ?, url = ?, price = ?, notes = ?, updated_at = ? WHERE id = ?",
            params![
                entity.title.trim(),
                entity.url,
                entity.price,
                entity.notes,
                now_millis(),
                entity.id
            ],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Wish {}", entity.id)));
        }

        load_wish(&conn, entity.id)?
            .ok_or_else(|| DomainError::NotFound(format!("Wish {}", entity.id)))
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        // memberships go with it (ON DELETE CASCADE)
        let changed = conn.execute("DELETE FROM wishes WHERE id = ?", params![id])?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Wish {}", id)));
        }
        Ok(())
    }
}
