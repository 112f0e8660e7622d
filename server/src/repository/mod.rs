//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod wish_repo;
mod list_repo;
mod list_item;

#[cfg(test)]
mod tests;

pub use traits::{Repository, RankStore};
pub use db::{init_db, DbState};
pub use wish_repo::WishRepository;
pub use list_repo::WishListRepository;
pub use list_item::{
    append_rank, initialize_order, renumber, reposition, ListItemPositioningOperations,
    ListItemRepository, SqliteRankStore,
};
