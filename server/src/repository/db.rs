//! Database Connection and Setup
//!
//! Manages the SQLite connection and creates the schema.

use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Database state wrapper
///
/// One connection behind an async mutex: every repository shares it, so
/// writes are serialized.
#[derive(Clone)]
pub struct DbState {
    pub conn: Arc<Mutex<Connection>>,
}

impl DbState {
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        self.conn.clone()
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(err: rusqlite::Error) -> Self {
        DomainError::Internal(err.to_string())
    }
}

/// Open (or create) the database at `db_path`. `:memory:` is accepted.
pub async fn init_db(db_path: &PathBuf) -> Result<DbState, String> {
    let conn = Connection::open(db_path)
        .map_err(|e| format!("Failed to open db {}: {}", db_path.display(), e))?;

    run_migrations(&conn)?;
    log::info!("Database ready at {}", db_path.display());

    Ok(DbState {
        conn: Arc::new(Mutex::new(conn)),
    })
}

/// Create tables and indexes if they don't exist
fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS wishes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            url TEXT,
            price REAL,
            notes TEXT,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS wish_lists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            sort_mode TEXT NOT NULL DEFAULT 'newest',
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS list_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            list_id INTEGER NOT NULL REFERENCES wish_lists(id) ON DELETE CASCADE,
            wish_id INTEGER NOT NULL REFERENCES wishes(id) ON DELETE CASCADE,
            sort_order REAL NOT NULL,
            added_at INTEGER NOT NULL,
            UNIQUE (list_id, wish_id)
        );

        CREATE INDEX IF NOT EXISTS idx_wishes_owner ON wishes(owner_id);
        CREATE INDEX IF NOT EXISTS idx_wish_lists_owner ON wish_lists(owner_id);
        CREATE INDEX IF NOT EXISTS idx_list_items_order ON list_items(list_id, sort_order, id);",
    )
    .map_err(|e| format!("Failed to run migrations: {}", e))
}

/// Current time in unix milliseconds
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Convert a SQLite rowid into an entity id
pub(crate) fn row_id(rowid: i64) -> DomainResult<u32> {
    u32::try_from(rowid).map_err(|_| DomainError::Internal(format!("Row id {} does not fit an id", rowid)))
}
