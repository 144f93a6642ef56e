//! Sign-in and sign-up form submission

use outreach_client::{AccessToken, ClientError, OutreachApi};
use std::sync::Arc;
use thiserror::Error;

use crate::routes::{Navigator, Route};
use crate::store::{ClientSession, StoreError};

/// Why a form submission failed. `Display` is the inline message.
#[derive(Debug, Error)]
pub enum AuthFormError {
    #[error("Email and password are required")]
    MissingFields,

    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Server said no; carries its `detail` or the generic fallback.
    #[error("{0}")]
    Rejected(String),

    #[error("Network error")]
    Network,

    #[error("Could not save session: {0}")]
    Storage(#[from] StoreError),
}

#[derive(Clone)]
pub struct AuthForms {
    api: Arc<dyn OutreachApi>,
    session: ClientSession,
    navigator: Arc<dyn Navigator>,
}

impl AuthForms {
    pub fn new(
        api: Arc<dyn OutreachApi>,
        session: ClientSession,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            session,
            navigator,
        }
    }

    /// Sign in, store the token and go home.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthFormError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthFormError::MissingFields);
        }

        let token = self
            .api
            .sign_in(email, password)
            .await
            .map_err(|e| form_error(e, "Login failed"))?;

        self.session.set_access_token(&token)?;
        tracing::info!("Signed in");
        self.navigator.push(Route::Home);
        Ok(())
    }

    /// Create an account, store the token and email, and go home.
    ///
    /// The confirmation is checked before anything is sent.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), AuthFormError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthFormError::MissingFields);
        }
        if password != confirm_password {
            return Err(AuthFormError::PasswordMismatch);
        }

        let token: AccessToken = self
            .api
            .sign_up(email, password)
            .await
            .map_err(|e| form_error(e, "Signup failed"))?;

        self.session.set_access_token(&token)?;
        self.session.set_user_email(email)?;
        tracing::info!("Account created");
        self.navigator.push(Route::Home);
        Ok(())
    }
}

fn form_error(err: ClientError, fallback: &str) -> AuthFormError {
    match err {
        ClientError::Network(e) => {
            tracing::warn!(error = %e, "Auth request failed to reach the backend");
            AuthFormError::Network
        }
        other => {
            tracing::warn!(error = %other, "Auth request rejected");
            AuthFormError::Rejected(
                other
                    .detail()
                    .map(str::to_string)
                    .unwrap_or_else(|| fallback.to_string()),
            )
        }
    }
}
