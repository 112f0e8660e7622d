//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::domain::DomainError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing or invalid x-user-id header")]
    Unauthenticated,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Domain(err) => match err {
                DomainError::NotFound(_) => StatusCode::NOT_FOUND,
                DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                DomainError::Conflict(_) => StatusCode::CONFLICT,
                DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
                DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::debug!("Request rejected ({}): {}", status, self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
