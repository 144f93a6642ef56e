//! Hands email drafts to the system mail client

use outreach_app::mail::{ComposeError, MailComposer, MailDraft};

/// Opens a `mailto:` link with the platform's default handler.
pub struct SystemMailComposer;

impl MailComposer for SystemMailComposer {
    fn compose(&self, draft: &MailDraft) -> Result<(), ComposeError> {
        tracing::debug!(recipients = draft.recipients.len(), "Opening mail client");
        open::that(draft.mailto_url()).map_err(|e| ComposeError::Launch(e.to_string()))
    }
}
