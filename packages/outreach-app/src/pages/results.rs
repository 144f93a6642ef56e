//! Results page: ranked companies, detail selection, feedback and email drafts.

use outreach_client::{EmailRequest, Feedback};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::context::AppContext;
use crate::error::AppError;
use crate::mail::MailDraft;
use crate::state::LoadState;
use crate::types::{rank_companies, Company};

pub const NO_EMAIL_NOTICE: &str = "No email found for this company";
pub const EMAIL_FAILED_NOTICE: &str = "Failed to generate email";

/// Result of asking for an outreach email.
#[derive(Debug, Clone, PartialEq)]
pub enum EmailOutcome {
    /// Draft generated and handed to the mail client.
    Composed(MailDraft),
    /// No company selected.
    NoSelection,
    /// The company has no usable email; nothing was sent.
    NoEmailFound,
    /// Another draft request is still outstanding; nothing was sent.
    AlreadyPending,
    Failed(String),
}

impl EmailOutcome {
    /// Notice to show the user, if any.
    pub fn notice(&self) -> Option<&str> {
        match self {
            EmailOutcome::NoEmailFound => Some(NO_EMAIL_NOTICE),
            EmailOutcome::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Default)]
struct ResultsState {
    load: LoadState<Vec<Company>>,
    selected: Option<usize>,
    feedback: HashMap<i64, Feedback>,
    email_pending: bool,
}

pub struct ResultsPresenter {
    ctx: AppContext,
    query_id: Option<i64>,
    state: Mutex<ResultsState>,
}

impl ResultsPresenter {
    /// `query_id` comes from the route; `None` means "the query just submitted".
    pub fn new(ctx: &AppContext, query_id: Option<i64>) -> Self {
        Self {
            ctx: ctx.clone(),
            query_id,
            state: Mutex::new(ResultsState::default()),
        }
    }

    pub fn query_id(&self) -> Option<i64> {
        self.query_id
    }

    fn state(&self) -> MutexGuard<'_, ResultsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Fetch (saved query) or read (just submitted) the results and rank them.
    ///
    /// A failed fetch shows an empty list. Without a token the presenter stays
    /// `Idle` and the guard has already redirected.
    pub async fn load(&self) -> LoadState<Vec<Company>> {
        if self.ctx.guard().require_token().is_none() {
            self.state().load = LoadState::Idle;
            return LoadState::Idle;
        }

        {
            let mut state = self.state();
            state.load = LoadState::Loading;
            state.selected = None;
        }

        let companies = match self.query_id {
            Some(query_id) => match self.ctx.authed().query_responses(query_id).await {
                Ok(result) => rank_companies(&result),
                Err(e) if e.is_auth() => {
                    self.state().load = LoadState::Idle;
                    return LoadState::Idle;
                }
                Err(e) => {
                    tracing::warn!(query_id, error = %e, "Failed to load saved query results");
                    Vec::new()
                }
            },
            None => rank_companies(&self.ctx.session.extraction_result()),
        };

        tracing::debug!(count = companies.len(), "Results loaded");
        let mut state = self.state();
        state.load = LoadState::Loaded(companies);
        state.load.clone()
    }

    pub fn load_state(&self) -> LoadState<Vec<Company>> {
        self.state().load.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state().load.is_loading()
    }

    /// Ranked companies; empty until loaded.
    pub fn companies(&self) -> Vec<Company> {
        self.state().load.loaded().cloned().unwrap_or_default()
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Open the detail panel for `index`, or close it if it is already open.
    ///
    /// Returns the selection afterwards. Unknown indexes change nothing.
    pub fn toggle_company(&self, index: usize) -> Option<usize> {
        let mut state = self.state();
        let count = state.load.loaded().map(Vec::len).unwrap_or(0);
        if index >= count {
            return state.selected;
        }

        state.selected = if state.selected == Some(index) {
            None
        } else {
            Some(index)
        };
        state.selected
    }

    pub fn close_details(&self) {
        self.state().selected = None;
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state().selected
    }

    pub fn selected_company(&self) -> Option<Company> {
        let state = self.state();
        let index = state.selected?;
        state.load.loaded()?.get(index).cloned()
    }

    // ------------------------------------------------------------------
    // Feedback
    // ------------------------------------------------------------------

    /// Send feedback; only a successful call changes the recorded choice.
    pub async fn submit_feedback(
        &self,
        response_id: i64,
        feedback: Feedback,
    ) -> Result<(), AppError> {
        if let Err(e) = self.ctx.authed().submit_feedback(response_id, feedback).await {
            tracing::warn!(response_id, feedback = %feedback, error = %e, "Feedback not recorded");
            return Err(e);
        }

        self.state().feedback.insert(response_id, feedback);
        Ok(())
    }

    /// Last feedback successfully recorded for a response.
    pub fn feedback_for(&self, response_id: i64) -> Option<Feedback> {
        self.state().feedback.get(&response_id).copied()
    }

    // ------------------------------------------------------------------
    // Email drafts
    // ------------------------------------------------------------------

    pub fn is_generating_email(&self) -> bool {
        self.state().email_pending
    }

    /// Draft an email to the selected company.
    pub async fn generate_email(&self) -> EmailOutcome {
        match self.selected_company() {
            Some(company) => self.email_company(company).await,
            None => EmailOutcome::NoSelection,
        }
    }

    /// Draft an email straight from a result card.
    pub async fn generate_email_for(&self, index: usize) -> EmailOutcome {
        let company = self
            .state()
            .load
            .loaded()
            .and_then(|companies| companies.get(index).cloned());

        match company {
            Some(company) => self.email_company(company).await,
            None => EmailOutcome::NoSelection,
        }
    }

    async fn email_company(&self, company: Company) -> EmailOutcome {
        let Some(_in_flight) = EmailInFlight::begin(self) else {
            return EmailOutcome::AlreadyPending;
        };

        let recipients = company.emails();
        if recipients.is_empty() {
            return EmailOutcome::NoEmailFound;
        }

        let request = EmailRequest {
            query_id: self.query_id,
            summary: company.summary.clone(),
        };
        let draft = match self.ctx.authed().generate_email(&request).await {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!(company = %company.name, error = %e, "Email generation failed");
                return EmailOutcome::Failed(EMAIL_FAILED_NOTICE.to_string());
            }
        };

        let mail = MailDraft {
            recipients,
            subject: draft.subject,
            body: draft.body,
        };
        match self.ctx.composer.compose(&mail) {
            Ok(()) => {
                tracing::info!(company = %company.name, recipients = mail.recipients.len(), "Email draft opened");
                EmailOutcome::Composed(mail)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not open mail client");
                EmailOutcome::Failed(e.to_string())
            }
        }
    }
}

/// Marks an email request as outstanding until dropped.
struct EmailInFlight<'a> {
    presenter: &'a ResultsPresenter,
}

impl<'a> EmailInFlight<'a> {
    fn begin(presenter: &'a ResultsPresenter) -> Option<Self> {
        let mut state = presenter.state();
        if state.email_pending {
            return None;
        }
        state.email_pending = true;
        Some(Self { presenter })
    }
}

impl Drop for EmailInFlight<'_> {
    fn drop(&mut self) {
        self.presenter.state().email_pending = false;
    }
}
