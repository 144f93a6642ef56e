//! Handing generated email drafts to the user's mail client.

use thiserror::Error;

/// A ready-to-send draft: recipients plus the generated subject and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailDraft {
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl MailDraft {
    /// `mailto:` link with comma-joined recipients and encoded subject/body.
    pub fn mailto_url(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipients.join(","),
            urlencoding::encode(&self.subject),
            urlencoding::encode(&self.body)
        )
    }
}

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("failed to open mail client: {0}")]
    Launch(String),
}

/// Opens an external compose window for a draft.
pub trait MailComposer: Send + Sync {
    fn compose(&self, draft: &MailDraft) -> Result<(), ComposeError>;
}
