//! Wish Entity
//!
//! Something a user would like to receive. A wish can sit in several lists.

use serde::{Deserialize, Serialize};
use super::entity::{Entity, DomainError, DomainResult};

const MAX_TITLE_LEN: usize = 200;

/// A desired item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wish {
    /// Unique identifier
    pub id: u32,
    /// User that created the wish
    pub owner_id: u32,
    /// Short description shown in lists
    pub title: String,
    /// Where to buy it
    pub url: Option<String>,
    /// Indicative price
    pub price: Option<f64>,
    /// Free-form notes (size, colour, ...)
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Wish {
    /// Create a new wish with default values
    pub fn new(id: u32, owner_id: u32, title: String) -> Self {
        Self {
            id,
            owner_id,
            title,
            url: None,
            price: None,
            notes: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    /// Check user-supplied fields before they are stored
    pub fn validate(&self) -> DomainResult<()> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DomainError::InvalidInput("Title must not be empty".into()));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(DomainError::InvalidInput(format!(
                "Title must be at most {} characters",
                MAX_TITLE_LEN
            )));
        }
        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err(DomainError::InvalidInput(format!("Invalid price {}", price)));
            }
        }
        Ok(())
    }
}

impl Entity for Wish {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn owner_id(&self) -> u32 {
        self.owner_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wish_creation() {
        let wish = Wish::new(1, 7, "Headphones".to_string());
        assert_eq!(wish.id(), 1);
        assert_eq!(wish.owner_id(), 7);
        assert!(wish.price.is_none());
        assert!(wish.validate().is_ok());
    }

    #[test]
    fn test_validate_title() {
        assert!(Wish::new(0, 1, "   ".to_string()).validate().is_err());
        assert!(Wish::new(0, 1, "x".repeat(201)).validate().is_err());
        assert!(Wish::new(0, 1, "x".repeat(200)).validate().is_ok());
    }

    #[test]
    fn test_validate_price() {
        let mut wish = Wish::new(0, 1, "Book".to_string());
        wish.price = Some(-1.0);
        assert!(wish.validate().is_err());
        wish.price = Some(f64::INFINITY);
        assert!(wish.validate().is_err());
        wish.price = Some(12.5);
        assert!(wish.validate().is_ok());
    }
}
