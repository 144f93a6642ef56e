//! Client-owned key-value storage.
//!
//! The raw [`KeyValueStore`] holds opaque strings, the way a browser's local
//! storage does. [`ClientSession`] is the only thing stages touch: it knows
//! every key, what lives under it, and how to read it back.
//!
//! Implementations:
//! - [`MemoryStore`]: tests and throwaway sessions
//! - [`FileStore`]: a JSON file on disk, used by the CLI

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use outreach_client::{decode, AccessToken, ExtractionResult};
use std::sync::Arc;
use thiserror::Error;

use crate::types::PendingQuery;

/// Keys written by the client. Names match the ones the web client used.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const USER_EMAIL: &str = "user_email";
    pub const USER_QUERY: &str = "userQuery";
    pub const UPLOADED_FILES: &str = "uploadedFiles";
    pub const EXTRACTION_RESULTS: &str = "extractionResults";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store contents are not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,
}

/// String-to-string storage with no schema.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Typed access to the client's persisted keys.
///
/// Reads never fail: a broken or missing value reads as absent (logged).
/// Writes return the store error so callers can decide what to do.
#[derive(Clone)]
pub struct ClientSession {
    store: Arc<dyn KeyValueStore>,
}

impl ClientSession {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Session backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read from client store");
                None
            }
        }
    }

    fn remove_logged(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            tracing::warn!(key, error = %e, "Failed to remove key from client store");
        }
    }

    // ------------------------------------------------------------------
    // Credentials
    // ------------------------------------------------------------------

    pub fn access_token(&self) -> Option<AccessToken> {
        self.read(keys::ACCESS_TOKEN)
            .filter(|token| !token.is_empty())
            .map(AccessToken::new)
    }

    pub fn set_access_token(&self, token: &AccessToken) -> Result<(), StoreError> {
        self.store.set(keys::ACCESS_TOKEN, token.as_str())
    }

    pub fn user_email(&self) -> Option<String> {
        self.read(keys::USER_EMAIL).filter(|email| !email.is_empty())
    }

    pub fn set_user_email(&self, email: &str) -> Result<(), StoreError> {
        self.store.set(keys::USER_EMAIL, email)
    }

    /// Avatar letter: first character of the stored email, upper-cased.
    pub fn user_initial(&self) -> char {
        self.user_email()
            .and_then(|email| email.chars().next())
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('U')
    }

    /// Drop the token and the remembered email.
    pub fn clear_credentials(&self) -> Result<(), StoreError> {
        self.store.remove(keys::ACCESS_TOKEN)?;
        self.store.remove(keys::USER_EMAIL)
    }

    // ------------------------------------------------------------------
    // Pending query
    // ------------------------------------------------------------------

    pub fn set_pending_query(&self, query: &PendingQuery) -> Result<(), StoreError> {
        let names = serde_json::to_string(&query.attachment_names)?;
        self.store.set(keys::USER_QUERY, &query.text)?;
        self.store.set(keys::UPLOADED_FILES, &names)
    }

    /// The staged query, if one was captured. An unreadable attachment list
    /// reads as empty.
    pub fn pending_query(&self) -> Option<PendingQuery> {
        let text = self.read(keys::USER_QUERY)?;
        let attachment_names = self
            .read(keys::UPLOADED_FILES)
            .and_then(|raw| match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(names) => Some(names),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring unreadable attachment list");
                    None
                }
            })
            .unwrap_or_default();

        Some(PendingQuery {
            text,
            attachment_names,
        })
    }

    /// Read the staged query and remove it so it is submitted at most once.
    pub fn take_pending_query(&self) -> Option<PendingQuery> {
        let query = self.pending_query()?;
        self.remove_logged(keys::USER_QUERY);
        self.remove_logged(keys::UPLOADED_FILES);
        Some(query)
    }

    // ------------------------------------------------------------------
    // Extraction results
    // ------------------------------------------------------------------

    pub fn set_extraction_result(&self, result: &ExtractionResult) -> Result<(), StoreError> {
        let raw = serde_json::to_string(result)?;
        self.store.set(keys::EXTRACTION_RESULTS, &raw)
    }

    /// The last stored extraction, or an empty one when missing or unreadable.
    pub fn extraction_result(&self) -> ExtractionResult {
        let Some(raw) = self.read(keys::EXTRACTION_RESULTS) else {
            return ExtractionResult::default();
        };

        decode::extraction_result(raw.as_bytes()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Stored extraction result is unreadable, showing none");
            ExtractionResult::default()
        })
    }
}
