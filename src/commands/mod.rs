//! HTTP Command Wrappers
//!
//! Client bindings to the backend routes, organized by domain.

mod list;
mod list_item;
mod wish;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use crate::error::ClientError;

// Re-export all public items
pub use list::*;
pub use list_item::*;
pub use wish::*;

/// Header carrying the acting user
pub const USER_HEADER: &str = "x-user-id";

/// Talks to the wishlist server on behalf of one user
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    user_id: u32,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, user_id: u32) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_id,
            http: reqwest::Client::new(),
        }
    }

    pub fn user_id(&self) -> u32 {
        self.user_id
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header(USER_HEADER, self.user_id.to_string())
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = check(req.send().await?).await?;
        Ok(resp.json().await?)
    }

    async fn send_empty(&self, req: RequestBuilder) -> Result<(), ClientError> {
        check(req.send().await?).await?;
        Ok(())
    }
}

/// Turn a non-2xx answer into `ClientError::Api`
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|b| b.error)
        .unwrap_or_else(|_| reason(status, text));
    log::warn!("Request failed with {}: {}", status, message);
    Err(ClientError::Api { status: status.as_u16(), message })
}

fn reason(status: StatusCode, text: String) -> String {
    if text.is_empty() {
        status.canonical_reason().unwrap_or("unknown error").to_string()
    } else {
        text
    }
}
