//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use fractional_rank::RankError;
use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;

    /// User that owns the entity
    fn owner_id(&self) -> u32;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainError {
    NotFound(String),
    InvalidInput(String),
    Conflict(String),
    Forbidden(String),
    Internal(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<RankError> for DomainError {
    fn from(err: RankError) -> Self {
        match err {
            RankError::NonFinite(_) => DomainError::InvalidInput(err.to_string()),
            // neighbours read by a stale client
            RankError::OutOfOrder { .. } => DomainError::Conflict(err.to_string()),
            RankError::Exhausted { .. } => DomainError::Internal(err.to_string()),
        }
    }
}
