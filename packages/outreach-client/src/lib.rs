//! Pure Outreach REST API client.
//!
//! A minimal client for the lead-generation backend. Supports signing in and
//! up, running an extraction query, re-fetching a saved query's results,
//! listing query history, recording feedback on a result and generating an
//! outreach email draft.
//!
//! Response bodies are validated by [`decode`] before they are returned.
//!
//! # Example
//!
//! ```rust,ignore
//! use outreach_client::{OutreachApi, OutreachClient};
//!
//! let client = OutreachClient::new("http://localhost:8000");
//!
//! let token = client.sign_in("me@example.com", "hunter2").await?;
//! let result = client.extract(&token, "boutique CRM consultancies in Austin").await?;
//! for (url, source) in &result.contacts_found {
//!     println!("{} ({})", url, source.fit_score);
//! }
//! ```

pub mod decode;
pub mod error;
pub mod types;

pub use error::{ClientError, Result};
pub use types::{
    AccessToken, ContactInfo, EmailDraft, EmailRequest, ExtractionResult, Feedback,
    PerSourceResult, QueryRecord,
};

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use std::time::Duration;
use types::{ExtractRequest, FeedbackRequest, SignInForm, SignUpRequest};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// The backend operations the client stages depend on.
///
/// [`OutreachClient`] is the HTTP implementation; tests substitute fakes.
#[async_trait]
pub trait OutreachApi: Send + Sync {
    /// `POST /signin` (form-encoded).
    async fn sign_in(&self, email: &str, password: &str) -> Result<AccessToken>;

    /// `POST /signup` (JSON).
    async fn sign_up(&self, email: &str, password: &str) -> Result<AccessToken>;

    /// `POST /extract`.
    async fn extract(&self, token: &AccessToken, query: &str) -> Result<ExtractionResult>;

    /// `GET /query/{id}/responses`.
    async fn query_responses(&self, token: &AccessToken, query_id: i64)
        -> Result<ExtractionResult>;

    /// `GET /chat_history`.
    async fn chat_history(&self, token: &AccessToken) -> Result<Vec<QueryRecord>>;

    /// `POST /feedback/{response_id}`. The response body is ignored.
    async fn submit_feedback(
        &self,
        token: &AccessToken,
        response_id: i64,
        feedback: Feedback,
    ) -> Result<()>;

    /// `POST /generate_email`.
    async fn generate_email(&self, token: &AccessToken, request: &EmailRequest)
        -> Result<EmailDraft>;
}

/// HTTP client for the Outreach backend.
#[derive(Clone)]
pub struct OutreachClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OutreachClient {
    /// Create a client with the transport's default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: normalize_base_url(base_url.into()),
        }
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(base_url.into()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and turn any non-2xx status into a [`ClientError`].
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), body = %body, "Outreach API returned an error");
            return Err(ClientError::from_status(status.as_u16(), &body));
        }

        Ok(response)
    }

    async fn send_for_bytes(&self, request: RequestBuilder) -> Result<Vec<u8>> {
        let response = self.send(request).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl OutreachApi for OutreachClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AccessToken> {
        let form = SignInForm {
            username: email,
            password,
        };
        let body = self
            .send_for_bytes(self.http_client.post(self.url("/signin")).form(&form))
            .await?;
        decode::access_token(&body)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AccessToken> {
        let request = SignUpRequest { email, password };
        let body = self
            .send_for_bytes(self.http_client.post(self.url("/signup")).json(&request))
            .await?;
        decode::access_token(&body)
    }

    async fn extract(&self, token: &AccessToken, query: &str) -> Result<ExtractionResult> {
        tracing::info!(query_len = query.len(), "Submitting extraction query");

        let body = self
            .send_for_bytes(
                self.http_client
                    .post(self.url("/extract"))
                    .bearer_auth(token.as_str())
                    .json(&ExtractRequest { query }),
            )
            .await?;
        let result = decode::extraction_result(&body)?;

        tracing::info!(
            sources = result.len(),
            errors = result.errors.len(),
            "Extraction finished"
        );
        Ok(result)
    }

    async fn query_responses(
        &self,
        token: &AccessToken,
        query_id: i64,
    ) -> Result<ExtractionResult> {
        let url = self.url(&format!("/query/{}/responses", query_id));
        let body = self
            .send_for_bytes(self.http_client.get(&url).bearer_auth(token.as_str()))
            .await?;
        decode::extraction_result(&body)
    }

    async fn chat_history(&self, token: &AccessToken) -> Result<Vec<QueryRecord>> {
        let body = self
            .send_for_bytes(
                self.http_client
                    .get(self.url("/chat_history"))
                    .bearer_auth(token.as_str()),
            )
            .await?;
        decode::query_records(&body)
    }

    async fn submit_feedback(
        &self,
        token: &AccessToken,
        response_id: i64,
        feedback: Feedback,
    ) -> Result<()> {
        let url = self.url(&format!("/feedback/{}", response_id));
        self.send(
            self.http_client
                .post(&url)
                .bearer_auth(token.as_str())
                .json(&FeedbackRequest { feedback }),
        )
        .await?;

        tracing::debug!(response_id, feedback = %feedback, "Feedback recorded");
        Ok(())
    }

    async fn generate_email(
        &self,
        token: &AccessToken,
        request: &EmailRequest,
    ) -> Result<EmailDraft> {
        let body = self
            .send_for_bytes(
                self.http_client
                    .post(self.url("/generate_email"))
                    .bearer_auth(token.as_str())
                    .json(request),
            )
            .await?;
        decode::email_draft(&body)
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
