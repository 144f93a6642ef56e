//! Session guard: gates protected views on the stored credential token

use outreach_client::AccessToken;
use std::sync::Arc;

use crate::routes::{Navigator, Route};
use crate::store::ClientSession;

#[derive(Clone)]
pub struct SessionGuard {
    session: ClientSession,
    navigator: Arc<dyn Navigator>,
}

impl SessionGuard {
    pub fn new(session: ClientSession, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }

    /// Check if the user is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.session.access_token().is_some()
    }

    /// The stored token, or a redirect to sign-in when there is none.
    ///
    /// Callers render nothing further on `None`.
    pub fn require_token(&self) -> Option<AccessToken> {
        let token = self.session.access_token();
        if token.is_none() {
            tracing::debug!("No credential token, redirecting to sign-in");
            self.navigator.push(Route::SignIn);
        }
        token
    }

    /// Explicit logout.
    pub fn logout(&self) {
        self.clear_and_redirect();
        tracing::info!("Signed out");
    }

    /// The backend rejected our token.
    pub fn expire(&self) {
        tracing::warn!("Credential token rejected by backend, clearing session");
        self.clear_and_redirect();
    }

    fn clear_and_redirect(&self) {
        if let Err(e) = self.session.clear_credentials() {
            tracing::warn!(error = %e, "Failed to clear credentials");
        }
        self.navigator.push(Route::SignIn);
    }
}
