//! Commands Layer
//!
//! HTTP command handlers that bridge clients to the repositories.
//! The acting user arrives in the `x-user-id` header, set by the auth layer
//! in front of this service, and is passed down explicitly.

mod error;
mod wish_cmd;
mod list_cmd;
mod list_item_cmd;

use axum::{
    http::HeaderMap,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::domain::{Entity, DomainError, WishList};
use crate::repository::Repository;
use crate::AppState;

pub use error::ApiError;
pub use wish_cmd::*;
pub use list_cmd::*;
pub use list_item_cmd::*;

pub const USER_HEADER: &str = "x-user-id";

/// Identity of the caller
pub fn actor_id(headers: &HeaderMap) -> Result<u32, ApiError> {
    headers
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u32>().ok())
        .ok_or(ApiError::Unauthenticated)
}

/// Fail unless `actor` owns `entity`
pub fn ensure_owner<T: Entity>(entity: &T, actor: u32, what: &str) -> Result<(), ApiError> {
    if entity.owner_id() == actor {
        Ok(())
    } else {
        Err(DomainError::Forbidden(format!("{} belongs to another user", what)).into())
    }
}

/// Load a list and check that `actor` owns it
pub(crate) async fn owned_list(state: &AppState, actor: u32, list_id: u32) -> Result<WishList, ApiError> {
    let list = state
        .lists
        .find_by_id(list_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("List {}", list_id)))?;
    ensure_owner(&list, actor, "List")?;
    Ok(list)
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/wishes", post(create_wish).get(list_wishes))
        .route(
            "/wishes/:id",
            get(get_wish).patch(update_wish).delete(delete_wish),
        )
        .route("/lists", post(create_list).get(list_lists))
        .route("/lists/:id", get(get_list).patch(rename_list).delete(delete_list))
        .route("/lists/:id/sort-mode", put(set_sort_mode))
        .route("/lists/:id/items", get(list_entries).post(add_entry))
        .route("/lists/:id/items/:wish_id", delete(remove_entry))
        .route("/lists/:id/items/:wish_id/position", put(move_entry))
        .route("/lists/:id/renumber", post(renumber_entries))
        .with_state(state)
}
