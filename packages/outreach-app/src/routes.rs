//! Route definitions for the application

use std::fmt;
use std::sync::{Mutex, PoisonError};

/// All application routes
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    // Authentication
    SignIn,
    SignUp,

    // Query flow
    Home,
    Process,
    Results { query_id: Option<i64> },

    History,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::SignIn => "/auth/login".to_string(),
            Route::SignUp => "/auth/signup".to_string(),
            Route::Home => "/".to_string(),
            Route::Process => "/process".to_string(),
            Route::Results { query_id: None } => "/results".to_string(),
            Route::Results {
                query_id: Some(id),
            } => format!("/results?query_id={}", id),
            Route::History => "/history".to_string(),
        }
    }

    /// Parse a path such as `/results?query_id=12`, as given to `outreach open`.
    ///
    /// A `query_id` that is not an integer is treated as absent.
    pub fn parse(path: &str) -> Option<Route> {
        let base = url::Url::parse("http://localhost/").ok()?;
        let parsed = base.join(path).ok()?;

        let route = match parsed.path().trim_end_matches('/') {
            "/auth/login" => Route::SignIn,
            "/auth/signup" => Route::SignUp,
            "" => Route::Home,
            "/process" => Route::Process,
            "/results" => Route::Results {
                query_id: parsed
                    .query_pairs()
                    .find(|(key, _)| key == "query_id")
                    .and_then(|(_, value)| value.parse().ok()),
            },
            "/history" => Route::History,
            _ => return None,
        };
        Some(route)
    }

    /// Whether the session guard applies to this route.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::SignIn | Route::SignUp)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Client-side navigation.
pub trait Navigator: Send + Sync {
    fn push(&self, route: Route);
}

/// Routes a [`HistoryNavigator`] remembers; older ones are dropped.
pub const MAX_ROUTES: usize = 32;

/// Navigator that keeps the most recent routes; the last one is the current view.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    stack: Mutex<Vec<Route>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(route: Route) -> Self {
        Self {
            stack: Mutex::new(vec![route]),
        }
    }

    pub fn current(&self) -> Option<Route> {
        self.stack
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn history(&self) -> Vec<Route> {
        self.stack
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for HistoryNavigator {
    fn push(&self, route: Route) {
        tracing::debug!(route = %route, "Navigating");
        let mut stack = self.stack.lock().unwrap_or_else(PoisonError::into_inner);
        stack.push(route);
        if stack.len() > MAX_ROUTES {
            let excess = stack.len() - MAX_ROUTES;
            stack.drain(..excess);
        }
    }
}
