//! HTTP Commands for list membership and custom ordering

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, ListEntry, Placement};
use crate::repository::{ListItemPositioningOperations, Repository};
use crate::AppState;
use super::{actor_id, ensure_owner, owned_list, ApiError};

#[derive(Debug, Deserialize)]
pub struct AddEntryArgs {
    pub wish_id: u32,
}

/// Target slot for a move: between `after` and `before`.
/// Leave `after` out to move to the top, `before` to move to the bottom.
#[derive(Debug, Default, Deserialize)]
pub struct MoveEntryArgs {
    #[serde(default)]
    pub after: Option<u32>,
    #[serde(default)]
    pub before: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct RenumberResult {
    pub renumbered: usize,
}

/// Entries in the list's current display order
pub async fn list_entries(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(list_id): Path<u32>,
) -> Result<Json<Vec<ListEntry>>, ApiError> {
    let actor = actor_id(&headers)?;
    let list = owned_list(&state, actor, list_id).await?;

    Ok(Json(state.items.entries(list_id, list.sort_mode).await?))
}

pub async fn add_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(list_id): Path<u32>,
    Json(args): Json<AddEntryArgs>,
) -> Result<Json<ListEntry>, ApiError> {
    let actor = actor_id(&headers)?;
    owned_list(&state, actor, list_id).await?;

    let wish = state
        .wishes
        .find_by_id(args.wish_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Wish {}", args.wish_id)))?;
    ensure_owner(&wish, actor, "Wish")?;

    Ok(Json(state.items.add_wish(list_id, wish.id).await?))
}

pub async fn remove_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((list_id, wish_id)): Path<(u32, u32)>,
) -> Result<StatusCode, ApiError> {
    let actor = actor_id(&headers)?;
    owned_list(&state, actor, list_id).await?;

    state.items.remove_wish(list_id, wish_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Move a wish inside a list that is in custom order
pub async fn move_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((list_id, wish_id)): Path<(u32, u32)>,
    Json(args): Json<MoveEntryArgs>,
) -> Result<Json<Placement>, ApiError> {
    let actor = actor_id(&headers)?;
    owned_list(&state, actor, list_id).await?;

    let placement = state
        .items
        .move_wish(list_id, wish_id, args.after, args.before)
        .await?;
    Ok(Json(placement))
}

pub async fn renumber_entries(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(list_id): Path<u32>,
) -> Result<Json<RenumberResult>, ApiError> {
    let actor = actor_id(&headers)?;
    owned_list(&state, actor, list_id).await?;

    let renumbered = state.items.renumber_list(list_id).await?;
    Ok(Json(RenumberResult { renumbered }))
}
