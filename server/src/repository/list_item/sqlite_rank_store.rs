//! SQLite Rank Store
//!
//! `RankStore` over a borrowed connection. Callers hand in a `Transaction`
//! (which derefs to `Connection`) so every read and write shares it.

use fractional_rank::validate_rank;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{DomainError, DomainResult};
use crate::repository::traits::RankStore;

pub struct SqliteRankStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteRankStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl RankStore for SqliteRankStore<'_> {
    fn member_rank(&self, list_id: u32, wish_id: u32) -> DomainResult<Option<f64>> {
        let rank: Option<f64> = self
            .conn
            .query_row(
                "SELECT sort_order FROM list_items WHERE list_id = ? AND wish_id = ?",
                params![list_id, wish_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(rank.map(validate_rank).transpose()?)
    }

    fn max_rank(&self, list_id: u32) -> DomainResult<Option<f64>> {
        let rank: Option<f64> = self.conn.query_row(
            "SELECT MAX(sort_order) FROM list_items WHERE list_id = ?",
            params![list_id],
            |row| row.get(0),
        )?;
        Ok(rank.map(validate_rank).transpose()?)
    }

    fn ordered_members(&self, list_id: u32) -> DomainResult<Vec<(u32, f64)>> {
        let mut stmt = self.conn.prepare(
            "SELECT wish_id, sort_order FROM list_items WHERE list_id = ? ORDER BY sort_order, id",
        )?;
        let members = stmt
            .query_map(params![list_id], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<(u32, f64)>>>()?;
        Ok(members)
    }

    fn write_rank(&self, list_id: u32, wish_id: u32, rank: f64) -> DomainResult<()> {
        let rank = validate_rank(rank)?;
        let changed = self.conn.execute(
            "UPDATE list_items SET sort_order = ? WHERE list_id = ? AND wish_id = ?",
            params![rank, list_id, wish_id],
        )?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Wish {} in list {}", wish_id, list_id)));
        }
        Ok(())
    }

    fn write_all_ranks(&self, list_id: u32, ranks: &[(u32, f64)]) -> DomainResult<()> {
        let mut stmt = self
            .conn
            .prepare("UPDATE list_items SET sort_order = ? WHERE list_id = ? AND wish_id = ?")?;
        for &(wish_id, rank) in ranks {
            let rank = validate_rank(rank)?;
            if stmt.execute(params![rank, list_id, wish_id])? == 0 {
                return Err(DomainError::NotFound(format!("Wish {} in list {}", wish_id, list_id)));
            }
        }
        Ok(())
    }
}
