//! In-process stand-ins for the backend and the mail client.

use async_trait::async_trait;
use outreach_app::mail::{ComposeError, MailComposer, MailDraft};
use outreach_client::{
    AccessToken, ClientError, EmailDraft, EmailRequest, ExtractionResult, Feedback, OutreachApi,
    QueryRecord, Result,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const FAKE_TOKEN: &str = "fake-token";

/// One backend endpoint, for scripting failures and counting calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    SignIn,
    SignUp,
    Extract,
    QueryResponses,
    ChatHistory,
    Feedback,
    GenerateEmail,
}

/// A call the fake received, with the arguments that matter to assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    SignIn { email: String },
    SignUp { email: String },
    Extract { query: String },
    QueryResponses { query_id: i64 },
    ChatHistory,
    Feedback { response_id: i64, feedback: Feedback },
    GenerateEmail(EmailRequest),
}

impl ApiCall {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            ApiCall::SignIn { .. } => Endpoint::SignIn,
            ApiCall::SignUp { .. } => Endpoint::SignUp,
            ApiCall::Extract { .. } => Endpoint::Extract,
            ApiCall::QueryResponses { .. } => Endpoint::QueryResponses,
            ApiCall::ChatHistory => Endpoint::ChatHistory,
            ApiCall::Feedback { .. } => Endpoint::Feedback,
            ApiCall::GenerateEmail(_) => Endpoint::GenerateEmail,
        }
    }
}

/// Scripted failure for an endpoint.
#[derive(Debug, Clone)]
pub enum FakeFailure {
    Unauthorized,
    Status(u16, Option<String>),
    Malformed,
}

impl FakeFailure {
    fn to_error(&self) -> ClientError {
        match self {
            FakeFailure::Unauthorized => ClientError::Unauthorized {
                detail: Some("Could not validate credentials".to_string()),
            },
            FakeFailure::Status(status, detail) => ClientError::Api {
                status: *status,
                detail: detail.clone(),
            },
            FakeFailure::Malformed => ClientError::MalformedResponse("fake".to_string()),
        }
    }
}

struct FakeState {
    extraction: ExtractionResult,
    saved: HashMap<i64, ExtractionResult>,
    history: Vec<QueryRecord>,
    draft: EmailDraft,
    failures: HashMap<Endpoint, FakeFailure>,
    calls: Vec<ApiCall>,
    hold: Option<Arc<Notify>>,
}

/// Backend double: canned responses, scripted failures and a call log.
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                extraction: ExtractionResult::default(),
                saved: HashMap::new(),
                history: Vec::new(),
                draft: EmailDraft {
                    subject: "Quick intro".to_string(),
                    body: "Hi there,\nWould love to chat.".to_string(),
                },
                failures: HashMap::new(),
                calls: Vec::new(),
                hold: None,
            }),
        }
    }

    pub fn set_extraction(&self, result: ExtractionResult) {
        self.state.lock().unwrap().extraction = result;
    }

    pub fn set_saved_query(&self, query_id: i64, result: ExtractionResult) {
        self.state.lock().unwrap().saved.insert(query_id, result);
    }

    pub fn set_history(&self, records: Vec<QueryRecord>) {
        self.state.lock().unwrap().history = records;
    }

    pub fn set_email_draft(&self, subject: &str, body: &str) {
        self.state.lock().unwrap().draft = EmailDraft {
            subject: subject.to_string(),
            body: body.to_string(),
        };
    }

    pub fn fail(&self, endpoint: Endpoint, failure: FakeFailure) {
        self.state.lock().unwrap().failures.insert(endpoint, failure);
    }

    /// Park saved-query fetches until the returned handle is notified.
    pub fn hold_query_responses(&self) -> Arc<Notify> {
        let release = Arc::new(Notify::new());
        self.state.lock().unwrap().hold = Some(release.clone());
        release
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.endpoint() == endpoint)
            .count()
    }

    /// Log the call, then return the scripted failure for its endpoint, if any.
    fn record(&self, call: ApiCall) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let endpoint = call.endpoint();
        state.calls.push(call);
        match state.failures.get(&endpoint) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl OutreachApi for FakeApi {
    async fn sign_in(&self, email: &str, _password: &str) -> Result<AccessToken> {
        self.record(ApiCall::SignIn {
            email: email.to_string(),
        })?;
        Ok(AccessToken::new(FAKE_TOKEN))
    }

    async fn sign_up(&self, email: &str, _password: &str) -> Result<AccessToken> {
        self.record(ApiCall::SignUp {
            email: email.to_string(),
        })?;
        Ok(AccessToken::new(FAKE_TOKEN))
    }

    async fn extract(&self, _token: &AccessToken, query: &str) -> Result<ExtractionResult> {
        self.record(ApiCall::Extract {
            query: query.to_string(),
        })?;
        Ok(self.state.lock().unwrap().extraction.clone())
    }

    async fn query_responses(
        &self,
        _token: &AccessToken,
        query_id: i64,
    ) -> Result<ExtractionResult> {
        self.record(ApiCall::QueryResponses { query_id })?;
        let hold = self.state.lock().unwrap().hold.take();
        if let Some(release) = hold {
            release.notified().await;
        }
        self.state
            .lock()
            .unwrap()
            .saved
            .get(&query_id)
            .cloned()
            .ok_or_else(|| ClientError::Api {
                status: 404,
                detail: Some("Query not found".to_string()),
            })
    }

    async fn chat_history(&self, _token: &AccessToken) -> Result<Vec<QueryRecord>> {
        self.record(ApiCall::ChatHistory)?;
        Ok(self.state.lock().unwrap().history.clone())
    }

    async fn submit_feedback(
        &self,
        _token: &AccessToken,
        response_id: i64,
        feedback: Feedback,
    ) -> Result<()> {
        self.record(ApiCall::Feedback {
            response_id,
            feedback,
        })
    }

    async fn generate_email(
        &self,
        _token: &AccessToken,
        request: &EmailRequest,
    ) -> Result<EmailDraft> {
        self.record(ApiCall::GenerateEmail(request.clone()))?;
        // Let concurrent callers run while this request is "in flight".
        tokio::task::yield_now().await;
        Ok(self.state.lock().unwrap().draft.clone())
    }
}

/// Mail composer that keeps every draft it was handed.
#[derive(Default)]
pub struct RecordingComposer {
    drafts: Mutex<Vec<MailDraft>>,
    failure: Mutex<Option<String>>,
}

impl RecordingComposer {
    pub fn drafts(&self) -> Vec<MailDraft> {
        self.drafts.lock().unwrap().clone()
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }
}

impl MailComposer for RecordingComposer {
    fn compose(&self, draft: &MailDraft) -> std::result::Result<(), ComposeError> {
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(ComposeError::Launch(message));
        }
        self.drafts.lock().unwrap().push(draft.clone());
        Ok(())
    }
}
