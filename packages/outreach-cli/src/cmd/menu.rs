//! Interactive main menu

use anyhow::Result;
use colored::Colorize;
use console::Term;
use dialoguer::Select;

use super::{auth, history, results, search};
use crate::context::CliContext;
use crate::render;

pub async fn run(ctx: &CliContext) -> Result<()> {
    let term = Term::stdout();
    render::print_banner(&term)?;

    if !ctx.is_signed_in() {
        auth::sign_in(ctx, None).await?;
    }

    loop {
        println!();
        let options = [
            "🔎 New search",
            "📋 Last results",
            "🕘 Earlier searches",
            "🚪 Sign out",
            "🛑 Exit",
        ];

        let selection = Select::with_theme(&ctx.theme())
            .with_prompt("What would you like to do?")
            .items(&options)
            .default(0)
            .interact_on(&term)?;

        match selection {
            0 => search::run(ctx, None, Vec::new()).await?,
            1 => results::browse(ctx, None).await?,
            2 => history::run(ctx, true).await?,
            3 => {
                auth::logout(ctx);
                break;
            }
            _ => {
                println!("{}", "👋 Goodbye!".bright_blue());
                break;
            }
        }

        if !ctx.is_signed_in() {
            break;
        }
    }

    Ok(())
}
