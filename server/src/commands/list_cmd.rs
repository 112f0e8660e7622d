//! HTTP Commands for Wish Lists

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;

use crate::domain::{SortMode, WishList};
use crate::repository::{ListItemPositioningOperations, Repository};
use crate::AppState;
use super::{actor_id, owned_list, ApiError};

#[derive(Debug, Deserialize)]
pub struct CreateListArgs {
    pub name: String,
    #[serde(default)]
    pub sort_mode: SortMode,
}

#[derive(Debug, Deserialize)]
pub struct RenameListArgs {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SortModeArgs {
    pub sort_mode: SortMode,
}

pub async fn create_list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(args): Json<CreateListArgs>,
) -> Result<Json<WishList>, ApiError> {
    let actor = actor_id(&headers)?;

    let mut list = WishList::new(0, actor, args.name);
    list.sort_mode = args.sort_mode;

    Ok(Json(state.lists.create(&list).await?))
}

pub async fn list_lists(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<WishList>>, ApiError> {
    let actor = actor_id(&headers)?;
    Ok(Json(state.lists.list_by_owner(actor).await?))
}

pub async fn get_list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u32>,
) -> Result<Json<WishList>, ApiError> {
    let actor = actor_id(&headers)?;
    Ok(Json(owned_list(&state, actor, id).await?))
}

pub async fn rename_list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u32>,
    Json(args): Json<RenameListArgs>,
) -> Result<Json<WishList>, ApiError> {
    let actor = actor_id(&headers)?;
    let mut list = owned_list(&state, actor, id).await?;
    list.name = args.name;

    Ok(Json(state.lists.update(&list).await?))
}

pub async fn delete_list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u32>,
) -> Result<StatusCode, ApiError> {
    let actor = actor_id(&headers)?;
    owned_list(&state, actor, id).await?;

    state.lists.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Change how a list is displayed.
///
/// Entering `custom` from another mode freezes the order the user was
/// looking at into ranks first.
pub async fn set_sort_mode(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u32>,
    Json(args): Json<SortModeArgs>,
) -> Result<Json<WishList>, ApiError> {
    let actor = actor_id(&headers)?;
    let list = owned_list(&state, actor, id).await?;

    if args.sort_mode == list.sort_mode {
        return Ok(Json(list));
    }

    if args.sort_mode == SortMode::Custom {
        let count = state.items.initialize_custom_order(id, list.sort_mode).await?;
        log::info!("List {}: switched from {} to custom ({} items)", id, list.sort_mode.as_str(), count);
        return Ok(Json(owned_list(&state, actor, id).await?));
    }

    Ok(Json(state.lists.set_sort_mode(id, args.sort_mode).await?))
}
