//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;
use crate::domain::{Entity, DomainError, DomainResult};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities owned by a user
    async fn list_by_owner(&self, owner_id: u32) -> DomainResult<Vec<T>>;

    /// Update an existing entity
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

/// Storage port used by the ordering routines.
///
/// Calls are synchronous and are expected to run inside one open
/// transaction, so a sequence of reads and writes is atomic.
pub trait RankStore {
    /// Rank of a wish in a list, `None` if the wish is not a member
    fn member_rank(&self, list_id: u32, wish_id: u32) -> DomainResult<Option<f64>>;

    /// Highest rank in the list
    fn max_rank(&self, list_id: u32) -> DomainResult<Option<f64>>;

    /// All members as (wish_id, rank), ascending by rank then arrival
    fn ordered_members(&self, list_id: u32) -> DomainResult<Vec<(u32, f64)>>;

    fn write_rank(&self, list_id: u32, wish_id: u32, rank: f64) -> DomainResult<()>;

    fn write_all_ranks(&self, list_id: u32, ranks: &[(u32, f64)]) -> DomainResult<()>;

    /// Ranks of the wishes on either side of a target slot.
    ///
    /// `after` is the wish that will precede the moved one, `before` the one
    /// that will follow it. Either may be absent at the ends of the list.
    fn neighbour_ranks(
        &self,
        list_id: u32,
        after: Option<u32>,
        before: Option<u32>,
    ) -> DomainResult<(Option<f64>, Option<f64>)> {
        let lookup = |wish_id: Option<u32>| -> DomainResult<Option<f64>> {
            match wish_id {
                Some(id) => self
                    .member_rank(list_id, id)?
                    .map(Some)
                    .ok_or_else(|| DomainError::NotFound(format!("Wish {} in list {}", id, list_id))),
                None => Ok(None),
            }
        };
        Ok((lookup(after)?, lookup(before)?))
    }
}
