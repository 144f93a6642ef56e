//! Outreach client stages
//!
//! Everything the Outreach front end does between a user's keystrokes and the
//! backend, with no rendering attached:
//!
//! - [`auth`] - Session guard, sign-in/sign-up forms, authenticated API calls
//! - [`pages::capture`] - Query text and attachment capture
//! - [`pages::process`] - The transitional extraction stage
//! - [`pages::results`] - Ranked results, selection, feedback, email drafts
//! - [`pages::history`] - Previously run queries
//!
//! Stages never share memory. They talk through the [`store::ClientSession`]
//! and through [`routes::Route`] parameters, and each one is built from an
//! [`AppContext`] so tests can swap the store, the API and the navigator.
//!
//! ```rust,ignore
//! let ctx = AppContext::new(session, Arc::new(client), navigator, composer);
//!
//! if let Some(mut capture) = QueryCapture::mount(&ctx) {
//!     capture.set_text("B2B payroll startups in Berlin");
//!     capture.submit()?;
//! }
//! ExtractionStage::new(&ctx).run().await;
//! let results = ResultsPresenter::new(&ctx, None);
//! results.load().await;
//! ```

pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod mail;
pub mod pages;
pub mod routes;
pub mod state;
pub mod store;
pub mod types;

pub use config::AppConfig;
pub use context::AppContext;
pub use error::{AppError, Result};
pub use routes::{HistoryNavigator, Navigator, Route};
