//! List Entry Commands
//!
//! Membership of wishes in a list, plus drag-and-drop reordering.

use reqwest::Method;
use serde::Serialize;
use crate::error::ClientError;
use crate::models::{ListEntry, Placement, RenumberResult};
use crate::store::ListStore;
use super::ApiClient;

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct AddEntryArgs {
    wish_id: u32,
}

#[derive(Serialize)]
struct MoveEntryArgs {
    after: Option<u32>,
    before: Option<u32>,
}

// ========================
// Commands
// ========================

impl ApiClient {
    pub async fn list_entries(&self, list_id: u32) -> Result<Vec<ListEntry>, ClientError> {
        self.send(self.request(Method::GET, &format!("/lists/{}/items", list_id))).await
    }

    pub async fn add_entry(&self, list_id: u32, wish_id: u32) -> Result<ListEntry, ClientError> {
        let req = self
            .request(Method::POST, &format!("/lists/{}/items", list_id))
            .json(&AddEntryArgs { wish_id });
        self.send(req).await
    }

    pub async fn remove_entry(&self, list_id: u32, wish_id: u32) -> Result<(), ClientError> {
        let path = format!("/lists/{}/items/{}", list_id, wish_id);
        self.send_empty(self.request(Method::DELETE, &path)).await
    }

    /// Place a wish between two neighbours. `None` means list start or end.
    pub async fn move_entry(
        &self,
        list_id: u32,
        wish_id: u32,
        after: Option<u32>,
        before: Option<u32>,
    ) -> Result<Placement, ClientError> {
        let path = format!("/lists/{}/items/{}/position", list_id, wish_id);
        let req = self.request(Method::PUT, &path).json(&MoveEntryArgs { after, before });
        self.send(req).await
    }

    pub async fn renumber_list(&self, list_id: u32) -> Result<RenumberResult, ClientError> {
        let req = self.request(Method::POST, &format!("/lists/{}/renumber", list_id));
        self.send(req).await
    }

    /// Fetch a list's entries into a fresh store
    pub async fn load_store(&self, list_id: u32) -> Result<ListStore, ClientError> {
        Ok(ListStore::new(list_id, self.list_entries(list_id).await?))
    }

    /// Drag-and-drop a wish to `to_index`.
    ///
    /// The store shows the move right away. On success it takes the server's
    /// rank and refetches if the server renumbered; on failure the move is undone,
    /// and a conflict also triggers a refetch since the local order was outdated.
    pub async fn reorder(
        &self,
        store: &mut ListStore,
        wish_id: u32,
        to_index: usize,
    ) -> Result<Placement, ClientError> {
        let list_id = store.list_id();
        let pending = store.move_to(wish_id, to_index)?;

        match self.move_entry(list_id, wish_id, pending.after, pending.before).await {
            Ok(placement) => {
                if store.confirm(&placement) {
                    log::info!("List {} was renumbered, refetching", list_id);
                    store.replace(self.list_entries(list_id).await?);
                }
                Ok(placement)
            }
            Err(e) => {
                store.rollback(&pending);
                if e.is_conflict() {
                    match self.list_entries(list_id).await {
                        Ok(entries) => store.replace(entries),
                        Err(refetch) => log::warn!("Refetch of list {} failed: {}", list_id, refetch),
                    }
                }
                Err(e)
            }
        }
    }
}
