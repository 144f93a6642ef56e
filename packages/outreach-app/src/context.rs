//! Dependencies every page is built from.

use outreach_client::OutreachApi;
use std::sync::Arc;

use crate::auth::{AuthForms, AuthedApi, SessionGuard};
use crate::mail::MailComposer;
use crate::pages::process::ExtractionMode;
use crate::routes::Navigator;
use crate::store::ClientSession;

/// Store, backend, navigation and mail handles passed to each stage.
#[derive(Clone)]
pub struct AppContext {
    pub session: ClientSession,
    pub api: Arc<dyn OutreachApi>,
    pub navigator: Arc<dyn Navigator>,
    pub composer: Arc<dyn MailComposer>,
    pub extraction_mode: ExtractionMode,
}

impl AppContext {
    pub fn new(
        session: ClientSession,
        api: Arc<dyn OutreachApi>,
        navigator: Arc<dyn Navigator>,
        composer: Arc<dyn MailComposer>,
    ) -> Self {
        Self {
            session,
            api,
            navigator,
            composer,
            extraction_mode: ExtractionMode::default(),
        }
    }

    pub fn with_extraction_mode(mut self, mode: ExtractionMode) -> Self {
        self.extraction_mode = mode;
        self
    }

    pub fn guard(&self) -> SessionGuard {
        SessionGuard::new(self.session.clone(), self.navigator.clone())
    }

    pub fn authed(&self) -> AuthedApi {
        AuthedApi::new(self.api.clone(), self.guard())
    }

    pub fn auth_forms(&self) -> AuthForms {
        AuthForms::new(self.api.clone(), self.session.clone(), self.navigator.clone())
    }
}
