//! Earlier searches

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Select;
use outreach_app::pages::QueryHistory;
use outreach_app::Route;

use super::results;
use crate::context::CliContext;
use crate::render;

/// List earlier searches; with `pick`, choose one and browse its results.
pub async fn run(ctx: &CliContext, pick: bool) -> Result<()> {
    let history = QueryHistory::new(&ctx.app);
    let records = match history.load().await {
        Ok(records) => records,
        Err(e) if e.is_auth() => {
            render::sign_in_hint();
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to load query history"),
    };

    if records.is_empty() {
        println!("{}", "No earlier searches".dimmed());
        return Ok(());
    }

    let items: Vec<String> = records.iter().map(render::history_line).collect();
    if !pick {
        for item in &items {
            println!("{}", item);
        }
        return Ok(());
    }

    let Some(choice) = Select::with_theme(&ctx.theme())
        .with_prompt("Open a search")
        .items(&items)
        .default(0)
        .interact_opt()?
    else {
        return Ok(());
    };

    history.open(records[choice].id);
    match ctx.current_route() {
        Some(Route::Results { query_id }) => results::browse(ctx, query_id).await,
        _ => Ok(()),
    }
}
