//! List Membership
//!
//! Placement of one wish inside one list.

use serde::{Deserialize, Serialize};
use super::wish::Wish;

/// Membership record, unique per (list_id, wish_id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub list_id: u32,
    pub wish_id: u32,
    /// Fractional rank used by the custom order
    pub sort_order: f64,
    /// Arrival number, breaks ties between equal ranks
    pub seq: i64,
    pub added_at: i64,
}

/// A wish as it appears inside a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEntry {
    pub wish: Wish,
    pub sort_order: f64,
    pub seq: i64,
    pub added_at: i64,
}

/// Result of moving a wish
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub wish_id: u32,
    /// Authoritative rank written by the server
    pub sort_order: f64,
    /// The whole list was renumbered; other ranks changed too
    pub renumbered: bool,
}
