//! Home page: query text and attachments.

use crate::context::AppContext;
use crate::routes::Route;
use crate::store::StoreError;
use crate::types::{Attachment, PendingQuery};

/// What happened when the form was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Staged and navigated to the processing view.
    Submitted(PendingQuery),
    /// Nothing to submit; nothing stored, no navigation.
    Rejected,
}

/// Query capture form state.
///
/// Attachments are listed by name only; their contents are never uploaded.
pub struct QueryCapture {
    ctx: AppContext,
    text: String,
    attachments: Vec<Attachment>,
}

impl QueryCapture {
    /// Mount the page, or redirect to sign-in and return `None`.
    pub fn mount(ctx: &AppContext) -> Option<Self> {
        ctx.guard().require_token()?;
        Some(Self {
            ctx: ctx.clone(),
            text: String::new(),
            attachments: Vec::new(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Append files from one picker invocation.
    pub fn add_attachments(&mut self, files: impl IntoIterator<Item = Attachment>) {
        self.attachments.extend(files);
    }

    /// Remove one attachment; an out-of-range index does nothing.
    pub fn remove_attachment(&mut self, index: usize) -> Option<Attachment> {
        (index < self.attachments.len()).then(|| self.attachments.remove(index))
    }

    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty() || !self.attachments.is_empty()
    }

    /// Stage the query and move on to processing.
    pub fn submit(&mut self) -> Result<CaptureOutcome, StoreError> {
        if !self.can_submit() {
            return Ok(CaptureOutcome::Rejected);
        }

        let query = PendingQuery {
            text: self.text.trim().to_string(),
            attachment_names: self.attachments.iter().map(|a| a.name.clone()).collect(),
        };
        self.ctx.session.set_pending_query(&query)?;

        tracing::info!(
            text_len = query.text.len(),
            attachments = query.attachment_names.len(),
            "Query captured"
        );
        self.attachments.clear();
        self.ctx.navigator.push(Route::Process);
        Ok(CaptureOutcome::Submitted(query))
    }
}
