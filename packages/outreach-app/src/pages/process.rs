//! Processing page: submits the staged query, then always moves on to results.
//!
//! A failed extraction never blocks the flow. The failure is logged and
//! reported in the [`ProcessOutcome`], and the results view shows whatever
//! the store already holds. The one exception is a rejected token, which
//! ends the session instead.

use std::time::Duration;

use crate::context::AppContext;
use crate::error::AppError;
use crate::routes::Route;
use crate::types::PendingQuery;

/// Delay used by [`ExtractionMode::FixedDelay`] when none is configured.
pub const DEFAULT_DEMO_DELAY: Duration = Duration::from_millis(2000);

/// How the processing page gets from "submitted" to "results".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionMode {
    /// Call `/extract` and wait for it.
    #[default]
    Live,
    /// Demo mode: wait, then show results without calling the backend.
    FixedDelay(Duration),
}

#[derive(Debug)]
pub enum ProcessOutcome {
    /// Extraction stored; `sources` entries came back.
    Completed { sources: usize },
    /// Extraction failed; navigated to results anyway.
    CompletedWithError(AppError),
    /// Demo mode finished waiting.
    Delayed,
    /// No token; sent to sign-in.
    NotAuthenticated,
    /// Nothing staged; sent home.
    NothingPending,
    /// Token rejected mid-request; sent to sign-in.
    SessionExpired,
}

impl ProcessOutcome {
    /// Whether the flow advanced to the results view.
    pub fn proceeded(&self) -> bool {
        matches!(
            self,
            ProcessOutcome::Completed { .. }
                | ProcessOutcome::CompletedWithError(_)
                | ProcessOutcome::Delayed
        )
    }
}

pub struct ExtractionStage {
    ctx: AppContext,
}

impl ExtractionStage {
    pub fn new(ctx: &AppContext) -> Self {
        Self { ctx: ctx.clone() }
    }

    /// Run the stage once on entry to the processing view.
    pub async fn run(&self) -> ProcessOutcome {
        if self.ctx.guard().require_token().is_none() {
            return ProcessOutcome::NotAuthenticated;
        }

        let Some(pending) = self.ctx.session.take_pending_query() else {
            tracing::debug!("No pending query, returning home");
            self.ctx.navigator.push(Route::Home);
            return ProcessOutcome::NothingPending;
        };

        let outcome = match self.ctx.extraction_mode {
            ExtractionMode::Live => self.submit(&pending).await,
            ExtractionMode::FixedDelay(delay) => {
                tokio::time::sleep(delay).await;
                ProcessOutcome::Delayed
            }
        };

        if outcome.proceeded() {
            self.ctx.navigator.push(Route::Results { query_id: None });
        }
        outcome
    }

    async fn submit(&self, pending: &PendingQuery) -> ProcessOutcome {
        if !pending.attachment_names.is_empty() {
            tracing::info!(
                attachments = ?pending.attachment_names,
                "Attachments are listed by name only and are not uploaded"
            );
        }

        let result = match self.ctx.authed().extract(&pending.text).await {
            Ok(result) => result,
            Err(AppError::SessionExpired) => return ProcessOutcome::SessionExpired,
            Err(AppError::NotAuthenticated) => return ProcessOutcome::NotAuthenticated,
            Err(e) => {
                tracing::warn!(error = %e, "Extraction failed, continuing to results");
                return ProcessOutcome::CompletedWithError(e);
            }
        };

        if let Err(e) = self.ctx.session.set_extraction_result(&result) {
            tracing::warn!(error = %e, "Failed to store extraction result");
            return ProcessOutcome::CompletedWithError(e.into());
        }

        ProcessOutcome::Completed {
            sources: result.len(),
        }
    }
}
