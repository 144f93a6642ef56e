//! Sign-in, sign-up and session commands

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password};

use crate::context::CliContext;

fn prompt_email(ctx: &CliContext, email: Option<String>) -> Result<String> {
    match email {
        Some(email) => Ok(email),
        None => Ok(Input::<String>::with_theme(&ctx.theme())
            .with_prompt("Email")
            .interact_text()?),
    }
}

pub async fn sign_in(ctx: &CliContext, email: Option<String>) -> Result<()> {
    let email = prompt_email(ctx, email)?;
    let password = Password::with_theme(&ctx.theme())
        .with_prompt("Password")
        .interact()?;

    ctx.app.auth_forms().sign_in(&email, &password).await?;
    println!("{} Signed in as {}", "✓".bright_green(), email.trim());
    Ok(())
}

pub async fn sign_up(ctx: &CliContext, email: Option<String>) -> Result<()> {
    let email = prompt_email(ctx, email)?;
    let password = Password::with_theme(&ctx.theme())
        .with_prompt("Password")
        .interact()?;
    let confirm = Password::with_theme(&ctx.theme())
        .with_prompt("Confirm password")
        .interact()?;

    ctx.app
        .auth_forms()
        .sign_up(&email, &password, &confirm)
        .await?;
    println!("{} Account created for {}", "✓".bright_green(), email.trim());
    Ok(())
}

pub fn logout(ctx: &CliContext) {
    ctx.app.guard().logout();
    println!("{}", "Signed out".bright_blue());
}

pub fn whoami(ctx: &CliContext) {
    if !ctx.is_signed_in() {
        println!("{}", "Not signed in".dimmed());
        return;
    }

    let session = &ctx.app.session;
    match session.user_email() {
        Some(email) => println!("({}) {}", session.user_initial().to_string().bold(), email),
        None => println!("({}) {}", session.user_initial().to_string().bold(), "signed in"),
    }
    println!("{}", ctx.config.api_url.dimmed());
}
