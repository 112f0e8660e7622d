//! Wishlist client.
//!
//! Keeps a local view of a list, applies drag-and-drop moves optimistically,
//! and syncs them with the wishlist server.

pub mod commands;
pub mod error;
pub mod models;
pub mod store;

pub use commands::ApiClient;
pub use error::ClientError;
pub use store::{ListStore, PendingMove};
