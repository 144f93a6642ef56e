//! The single way pages call bearer-authenticated endpoints.
//!
//! Every call reads the token through the [`SessionGuard`]: no token means a
//! redirect to sign-in and no request. A 401 from the backend clears the
//! session and redirects the same way, whichever endpoint returned it.

use outreach_client::{
    AccessToken, ClientError, EmailDraft, EmailRequest, ExtractionResult, Feedback, OutreachApi,
    QueryRecord,
};
use std::sync::Arc;

use super::SessionGuard;
use crate::error::{AppError, Result};

#[derive(Clone)]
pub struct AuthedApi {
    api: Arc<dyn OutreachApi>,
    guard: SessionGuard,
}

impl AuthedApi {
    pub fn new(api: Arc<dyn OutreachApi>, guard: SessionGuard) -> Self {
        Self { api, guard }
    }

    fn token(&self) -> Result<AccessToken> {
        self.guard.require_token().ok_or(AppError::NotAuthenticated)
    }

    fn check<T>(&self, result: std::result::Result<T, ClientError>) -> Result<T> {
        match result {
            Err(e) if e.is_unauthorized() => {
                self.guard.expire();
                Err(AppError::SessionExpired)
            }
            other => other.map_err(AppError::from),
        }
    }

    pub async fn extract(&self, query: &str) -> Result<ExtractionResult> {
        let token = self.token()?;
        let result = self.api.extract(&token, query).await;
        self.check(result)
    }

    pub async fn query_responses(&self, query_id: i64) -> Result<ExtractionResult> {
        let token = self.token()?;
        let result = self.api.query_responses(&token, query_id).await;
        self.check(result)
    }

    pub async fn chat_history(&self) -> Result<Vec<QueryRecord>> {
        let token = self.token()?;
        let result = self.api.chat_history(&token).await;
        self.check(result)
    }

    pub async fn submit_feedback(&self, response_id: i64, feedback: Feedback) -> Result<()> {
        let token = self.token()?;
        let result = self.api.submit_feedback(&token, response_id, feedback).await;
        self.check(result)
    }

    pub async fn generate_email(&self, request: &EmailRequest) -> Result<EmailDraft> {
        let token = self.token()?;
        let result = self.api.generate_email(&token, request).await;
        self.check(result)
    }
}
