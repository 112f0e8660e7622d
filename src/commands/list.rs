//! Wish List Commands

use reqwest::Method;
use serde::Serialize;
use crate::error::ClientError;
use crate::models::{SortMode, WishList};
use super::ApiClient;

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct CreateListArgs<'a> {
    name: &'a str,
    sort_mode: SortMode,
}

#[derive(Serialize)]
struct RenameListArgs<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct SortModeArgs {
    sort_mode: SortMode,
}

// ========================
// Commands
// ========================

impl ApiClient {
    pub async fn create_list(&self, name: &str, sort_mode: SortMode) -> Result<WishList, ClientError> {
        let args = CreateListArgs { name, sort_mode };
        self.send(self.request(Method::POST, "/lists").json(&args)).await
    }

    pub async fn list_lists(&self) -> Result<Vec<WishList>, ClientError> {
        self.send(self.request(Method::GET, "/lists")).await
    }

    pub async fn get_list(&self, id: u32) -> Result<WishList, ClientError> {
        self.send(self.request(Method::GET, &format!("/lists/{}", id))).await
    }

    pub async fn rename_list(&self, id: u32, name: &str) -> Result<WishList, ClientError> {
        let req = self.request(Method::PATCH, &format!("/lists/{}", id)).json(&RenameListArgs { name });
        self.send(req).await
    }

    pub async fn delete_list(&self, id: u32) -> Result<(), ClientError> {
        self.send_empty(self.request(Method::DELETE, &format!("/lists/{}", id))).await
    }

    /// Switching to `Custom` makes the server freeze the current display order into ranks
    pub async fn set_sort_mode(&self, id: u32, sort_mode: SortMode) -> Result<WishList, ClientError> {
        let req = self
            .request(Method::PUT, &format!("/lists/{}/sort-mode", id))
            .json(&SortModeArgs { sort_mode });
        self.send(req).await
    }
}
