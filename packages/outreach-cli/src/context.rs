//! Application context shared by all commands

use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use outreach_app::store::{ClientSession, FileStore};
use outreach_app::{AppConfig, AppContext, HistoryNavigator, Route};
use std::sync::Arc;

use crate::compose::SystemMailComposer;

/// Client stages wired to the on-disk session, the HTTP backend and the
/// system mail client.
pub struct CliContext {
    pub app: AppContext,
    pub navigator: Arc<HistoryNavigator>,
    pub config: AppConfig,
}

impl CliContext {
    pub fn new(config: AppConfig) -> Result<Self> {
        let store = FileStore::open(config.session_file()).with_context(|| {
            format!(
                "Failed to open session store at {}",
                config.session_file().display()
            )
        })?;
        let api = config
            .build_client()
            .context("Failed to build the HTTP client")?;
        let navigator = Arc::new(HistoryNavigator::new());

        let app = AppContext::new(
            ClientSession::new(Arc::new(store)),
            Arc::new(api),
            navigator.clone(),
            Arc::new(SystemMailComposer),
        )
        .with_extraction_mode(config.extraction_mode);

        tracing::debug!(api_url = %config.api_url, state_dir = %config.state_dir.display(), "Client ready");
        Ok(Self {
            app,
            navigator,
            config,
        })
    }

    pub fn theme(&self) -> ColorfulTheme {
        ColorfulTheme::default()
    }

    pub fn is_signed_in(&self) -> bool {
        self.app.guard().is_authenticated()
    }

    /// Where the last stage asked to go.
    pub fn current_route(&self) -> Option<Route> {
        self.navigator.current()
    }
}
