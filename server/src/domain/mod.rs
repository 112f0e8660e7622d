//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer only depends on serde and the shared rank allocator.

mod entity;
mod wish;
mod wish_list;
mod list_item;

pub use entity::{Entity, DomainError, DomainResult};
pub use wish::Wish;
pub use wish_list::{WishList, SortMode};
pub use list_item::{ListItem, ListEntry, Placement};
