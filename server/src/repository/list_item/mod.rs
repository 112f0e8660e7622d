//! List Item Repository Module
//!
//! This module provides list membership functionality split into specialized sub-modules:
//! - list_item_repo: Membership CRUD (add, remove, ordered entries)
//! - ordering: Rank allocation and renumbering over the `RankStore` port
//! - sqlite_rank_store: `RankStore` implementation over an open transaction
//! - list_item_positioning: Transactional move / renumber / custom-order setup

mod list_item_repo;
mod ordering;
mod sqlite_rank_store;
mod list_item_positioning;

pub use list_item_repo::ListItemRepository;
pub use ordering::{append_rank, initialize_order, renumber, reposition};
pub use sqlite_rank_store::SqliteRankStore;

// Re-export the operation trait so it can be used by importing ListItemRepository
pub use list_item_positioning::ListItemPositioningOperations;
