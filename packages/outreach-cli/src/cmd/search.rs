//! Run a search: capture, extract, then browse the results

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Input;
use outreach_app::pages::{CaptureOutcome, ExtractionStage, ProcessOutcome, QueryCapture};
use outreach_app::types::Attachment;
use std::path::PathBuf;

use super::results;
use crate::context::CliContext;
use crate::render;

pub async fn run(ctx: &CliContext, query: Option<String>, attach: Vec<PathBuf>) -> Result<()> {
    let Some(mut capture) = QueryCapture::mount(&ctx.app) else {
        render::sign_in_hint();
        return Ok(());
    };

    let text = match query {
        Some(text) => text,
        None => Input::<String>::with_theme(&ctx.theme())
            .with_prompt("Which companies are you looking for?")
            .allow_empty(true)
            .interact_text()?,
    };
    capture.set_text(text);

    let attachments = attach
        .iter()
        .map(|path| {
            Attachment::from_path(path)
                .with_context(|| format!("Cannot read attachment {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    for attachment in &attachments {
        println!(
            "  📎 {} {}",
            attachment.name,
            attachment.size_label().dimmed()
        );
    }
    capture.add_attachments(attachments);

    if capture.submit()? == CaptureOutcome::Rejected {
        println!("{}", "Nothing to search for".bright_yellow());
        return Ok(());
    }

    println!("{}", "🔎 Searching...".bright_blue());
    match ExtractionStage::new(&ctx.app).run().await {
        ProcessOutcome::Completed { sources } => {
            println!("{} Found {} sources", "✓".bright_green(), sources);
        }
        ProcessOutcome::CompletedWithError(e) => {
            println!(
                "{} Search failed ({}). Showing the last stored results.",
                "!".bright_yellow(),
                e
            );
        }
        ProcessOutcome::Delayed => {
            println!("{}", "Demo mode: showing stored results".dimmed());
        }
        ProcessOutcome::NotAuthenticated | ProcessOutcome::SessionExpired => {
            render::sign_in_hint();
            return Ok(());
        }
        ProcessOutcome::NothingPending => return Ok(()),
    }

    results::browse(ctx, None).await
}
