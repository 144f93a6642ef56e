//! Interactive results browser

use anyhow::Result;
use colored::Colorize;
use dialoguer::Select;
use outreach_app::pages::{EmailOutcome, ResultsPresenter};
use outreach_app::state::LoadState;
use outreach_client::Feedback;

use crate::context::CliContext;
use crate::render;

/// Browse the results of the last search, or of a saved query.
pub async fn browse(ctx: &CliContext, query_id: Option<i64>) -> Result<()> {
    let presenter = ResultsPresenter::new(&ctx.app, query_id);
    if presenter.load().await == LoadState::Idle {
        render::sign_in_hint();
        return Ok(());
    }

    let companies = presenter.companies();
    if companies.is_empty() {
        println!("{}", "No results".dimmed());
        return Ok(());
    }

    let mut items: Vec<String> = companies.iter().map(render::company_line).collect();
    items.push("Done".to_string());

    loop {
        let choice = Select::with_theme(&ctx.theme())
            .with_prompt(format!("{} companies, best fit first", companies.len()))
            .items(&items)
            .default(presenter.selected_index().unwrap_or(0))
            .interact()?;

        if choice >= companies.len() {
            break;
        }
        if presenter.toggle_company(choice).is_none() {
            continue;
        }
        if !company_actions(ctx, &presenter).await? {
            break;
        }
    }

    Ok(())
}

/// Act on the selected company until the user goes back.
///
/// Returns `false` once the session has ended.
async fn company_actions(ctx: &CliContext, presenter: &ResultsPresenter) -> Result<bool> {
    let actions = [
        "✉️  Draft outreach email",
        "👍 Good fit",
        "👎 Poor fit",
        "← Back",
    ];

    while let Some(company) = presenter.selected_company() {
        render::company_details(&company, presenter.feedback_for(company.response_id));

        let choice = Select::with_theme(&ctx.theme())
            .with_prompt(company.name.as_str())
            .items(&actions)
            .default(0)
            .interact()?;

        match choice {
            0 => match presenter.generate_email().await {
                EmailOutcome::Composed(draft) => println!(
                    "{} Draft opened for {}",
                    "✓".bright_green(),
                    draft.recipients.join(", ")
                ),
                outcome => {
                    if let Some(notice) = outcome.notice() {
                        println!("{}", notice.bright_yellow());
                    }
                }
            },
            1 | 2 => {
                let feedback = if choice == 1 {
                    Feedback::Positive
                } else {
                    Feedback::Negative
                };
                match presenter.submit_feedback(company.response_id, feedback).await {
                    Ok(()) => println!("{} Feedback recorded", "✓".bright_green()),
                    Err(e) if e.is_auth() => {}
                    Err(e) => println!("{} {}", "Could not record feedback:".bright_yellow(), e),
                }
            }
            _ => presenter.close_details(),
        }

        if !ctx.is_signed_in() {
            render::sign_in_hint();
            return Ok(false);
        }
    }

    Ok(true)
}
