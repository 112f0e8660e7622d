//! Client Models
//!
//! Data structures matching backend entities.

use serde::{Deserialize, Serialize};

/// Wish data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wish {
    pub id: u32,
    pub owner_id: u32,
    pub title: String,
    pub url: Option<String>,
    pub price: Option<f64>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    Custom,
    Newest,
    Oldest,
    Title,
    PriceLow,
    PriceHigh,
}

/// Wish list data structure (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishList {
    pub id: u32,
    pub owner_id: u32,
    pub name: String,
    pub sort_mode: SortMode,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A wish inside a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEntry {
    pub wish: Wish,
    pub sort_order: f64,
    pub seq: i64,
    pub added_at: i64,
}

/// Server answer to a move
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub wish_id: u32,
    pub sort_order: f64,
    pub renumbered: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RenumberResult {
    pub renumbered: usize,
}
