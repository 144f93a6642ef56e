//! Errors surfaced by the client stages.

use outreach_client::ClientError;
use thiserror::Error;

use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// No credential token; the caller has already been sent to sign-in.
    #[error("not signed in")]
    NotAuthenticated,

    /// The backend rejected the stored token; it has been cleared.
    #[error("session expired, please sign in again")]
    SessionExpired,

    #[error(transparent)]
    Api(#[from] ClientError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// True for the two variants that already redirected to sign-in.
    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::NotAuthenticated | AppError::SessionExpired)
    }
}
