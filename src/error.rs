//! Client errors

use fractional_rank::RankError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx answer; `message` is the server's `error` field when present
    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Wish {0} is not in this list")]
    UnknownWish(u32),

    #[error(transparent)]
    Rank(#[from] RankError),
}

impl ClientError {
    /// The server rejected a move because our view of the list was outdated
    pub fn is_conflict(&self) -> bool {
        matches!(self, ClientError::Api { status: 409, .. })
    }
}
