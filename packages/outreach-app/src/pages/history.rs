//! Query history: the user's earlier searches, newest first.

use outreach_client::QueryRecord;
use std::sync::{Mutex, PoisonError};

use crate::context::AppContext;
use crate::error::Result;
use crate::routes::Route;
use crate::state::LoadState;

pub struct QueryHistory {
    ctx: AppContext,
    state: Mutex<LoadState<Vec<QueryRecord>>>,
}

impl QueryHistory {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            ctx: ctx.clone(),
            state: Mutex::new(LoadState::Idle),
        }
    }

    fn set_state(&self, state: LoadState<Vec<QueryRecord>>) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Fetch the history. A failed fetch leaves an empty list behind, except
    /// for auth failures, which leave the page `Idle`.
    pub async fn load(&self) -> Result<Vec<QueryRecord>> {
        self.set_state(LoadState::Loading);

        match self.ctx.authed().chat_history().await {
            Ok(mut records) => {
                records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                tracing::debug!(count = records.len(), "Query history loaded");
                self.set_state(LoadState::Loaded(records.clone()));
                Ok(records)
            }
            Err(e) => {
                if e.is_auth() {
                    self.set_state(LoadState::Idle);
                } else {
                    tracing::warn!(error = %e, "Failed to load query history");
                    self.set_state(LoadState::Loaded(Vec::new()));
                }
                Err(e)
            }
        }
    }

    pub fn load_state(&self) -> LoadState<Vec<QueryRecord>> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Show the stored results of an earlier query.
    pub fn open(&self, query_id: i64) {
        self.ctx.navigator.push(Route::Results {
            query_id: Some(query_id),
        });
    }
}
