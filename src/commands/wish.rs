//! Wish Commands

use reqwest::Method;
use serde::Serialize;
use crate::error::ClientError;
use crate::models::Wish;
use super::ApiClient;

// ========================
// Argument Structs
// ========================

#[derive(Debug, Default, Serialize)]
pub struct CreateWishArgs<'a> {
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
}

/// Fields left as None are not sent and stay unchanged
#[derive(Debug, Default, Serialize)]
pub struct UpdateWishArgs<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
}

// ========================
// Commands
// ========================

impl ApiClient {
    pub async fn create_wish(&self, args: &CreateWishArgs<'_>) -> Result<Wish, ClientError> {
        self.send(self.request(Method::POST, "/wishes").json(args)).await
    }

    pub async fn list_wishes(&self) -> Result<Vec<Wish>, ClientError> {
        self.send(self.request(Method::GET, "/wishes")).await
    }

    pub async fn get_wish(&self, id: u32) -> Result<Wish, ClientError> {
        self.send(self.request(Method::GET, &format!("/wishes/{}", id))).await
    }

    pub async fn update_wish(&self, id: u32, args: &UpdateWishArgs<'_>) -> Result<Wish, ClientError> {
        self.send(self.request(Method::PATCH, &format!("/wishes/{}", id)).json(args)).await
    }

    pub async fn delete_wish(&self, id: u32) -> Result<(), ClientError> {
        self.send_empty(self.request(Method::DELETE, &format!("/wishes/{}", id))).await
    }
}
