//! Open a client path such as `/results?query_id=12`

use anyhow::{bail, Result};
use outreach_app::Route;

use super::{auth, history, menu, results, search};
use crate::context::CliContext;

pub async fn run(ctx: &CliContext, path: &str) -> Result<()> {
    let Some(route) = Route::parse(path) else {
        bail!("Unknown path {path:?}");
    };
    tracing::debug!(route = %route, "Opening link");

    match route {
        Route::SignIn => auth::sign_in(ctx, None).await,
        Route::SignUp => auth::sign_up(ctx, None).await,
        Route::Home => menu::run(ctx).await,
        Route::Process => search::run(ctx, None, Vec::new()).await,
        Route::Results { query_id } => results::browse(ctx, query_id).await,
        Route::History => history::run(ctx, true).await,
    }
}
