//! Wish List Entity
//!
//! An ordered collection of wishes owned by one user.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use super::entity::{Entity, DomainError, DomainResult};
use super::list_item::ListEntry;

/// How the entries of a list are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Drag-and-drop order stored in `sort_order`
    Custom,
    /// Most recently added first
    #[default]
    Newest,
    Oldest,
    /// Alphabetical by title
    Title,
    PriceLow,
    PriceHigh,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Custom => "custom",
            SortMode::Newest => "newest",
            SortMode::Oldest => "oldest",
            SortMode::Title => "title",
            SortMode::PriceLow => "price_low",
            SortMode::PriceHigh => "price_high",
        }
    }

    pub fn parse(s: &str) -> DomainResult<Self> {
        match s {
            "custom" => Ok(SortMode::Custom),
            "newest" => Ok(SortMode::Newest),
            "oldest" => Ok(SortMode::Oldest),
            "title" => Ok(SortMode::Title),
            "price_low" => Ok(SortMode::PriceLow),
            "price_high" => Ok(SortMode::PriceHigh),
            other => Err(DomainError::InvalidInput(format!("Unknown sort mode '{}'", other))),
        }
    }

    /// Sort entries into display order.
    ///
    /// Every mode falls back to arrival order (`seq`) so the result is
    /// deterministic. Wishes without a price go last in both price modes.
    pub fn sort_entries(&self, entries: &mut [ListEntry]) {
        entries.sort_by(|a, b| self.compare(a, b).then(a.seq.cmp(&b.seq)));
    }

    fn compare(&self, a: &ListEntry, b: &ListEntry) -> Ordering {
        match self {
            SortMode::Custom => a.sort_order.total_cmp(&b.sort_order),
            SortMode::Newest => b.added_at.cmp(&a.added_at).then(b.seq.cmp(&a.seq)),
            SortMode::Oldest => a.added_at.cmp(&b.added_at),
            SortMode::Title => a.wish.title.to_lowercase().cmp(&b.wish.title.to_lowercase()),
            SortMode::PriceLow => compare_price(a.wish.price, b.wish.price, false),
            SortMode::PriceHigh => compare_price(a.wish.price, b.wish.price, true),
        }
    }
}

fn compare_price(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if descending => b.total_cmp(&a),
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A list of wishes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishList {
    /// Unique identifier
    pub id: u32,
    /// User that owns the list
    pub owner_id: u32,
    pub name: String,
    /// Current display order
    pub sort_mode: SortMode,
    pub created_at: i64,
    pub updated_at: i64,
}

impl WishList {
    pub fn new(id: u32, owner_id: u32, name: String) -> Self {
        Self {
            id,
            owner_id,
            name,
            sort_mode: SortMode::default(),
            created_at: 0,
            updated_at: 0,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("List name must not be empty".into()));
        }
        Ok(())
    }
}

impl Entity for WishList {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn owner_id(&self) -> u32 {
        self.owner_id
    }
}
