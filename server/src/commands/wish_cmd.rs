//! HTTP Commands for Wish CRUD

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;

use crate::domain::{DomainError, Wish};
use crate::repository::Repository;
use crate::AppState;
use super::{actor_id, ensure_owner, ApiError};

#[derive(Debug, Deserialize)]
pub struct CreateWishArgs {
    pub title: String,
    pub url: Option<String>,
    pub price: Option<f64>,
    pub notes: Option<String>,
}

/// Fields left out are kept as they are
#[derive(Debug, Deserialize)]
pub struct UpdateWishArgs {
    pub title: Option<String>,
    pub url: Option<String>,
    pub price: Option<f64>,
    pub notes: Option<String>,
}

async fn owned_wish(state: &AppState, actor: u32, id: u32) -> Result<Wish, ApiError> {
    let wish = state
        .wishes
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Wish {}", id)))?;
    ensure_owner(&wish, actor, "Wish")?;
    Ok(wish)
}

/// Create a new wish for the caller
pub async fn create_wish(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(args): Json<CreateWishArgs>,
) -> Result<Json<Wish>, ApiError> {
    let actor = actor_id(&headers)?;

    let mut wish = Wish::new(0, actor, args.title);
    wish.url = args.url;
    wish.price = args.price;
    wish.notes = args.notes;

    Ok(Json(state.wishes.create(&wish).await?))
}

/// List the caller's wishes, newest first
pub async fn list_wishes(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Wish>>, ApiError> {
    let actor = actor_id(&headers)?;
    Ok(Json(state.wishes.list_by_owner(actor).await?))
}

pub async fn get_wish(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u32>,
) -> Result<Json<Wish>, ApiError> {
    let actor = actor_id(&headers)?;
    Ok(Json(owned_wish(&state, actor, id).await?))
}

pub async fn update_wish(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u32>,
    Json(args): Json<UpdateWishArgs>,
) -> Result<Json<Wish>, ApiError> {
    let actor = actor_id(&headers)?;
    let mut wish = owned_wish(&state, actor, id).await?;

    if let Some(title) = args.title {
        wish.title = title;
    }
    if args.url.is_some() {
        wish.url = args.url;
    }
    if args.price.is_some() {
        wish.price = args.price;
    }
    if args.notes.is_some() {
        wish.notes = args.notes;
    }

    Ok(Json(state.wishes.update(&wish).await?))
}

/// Delete a wish and drop it from every list
pub async fn delete_wish(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u32>,
) -> Result<StatusCode, ApiError> {
    let actor = actor_id(&headers)?;
    owned_wish(&state, actor, id).await?;

    state.wishes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
