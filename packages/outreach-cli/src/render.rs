//! Terminal output for results, details and history

use anyhow::Result;
use colored::{ColoredString, Colorize};
use console::Term;
use outreach_app::types::{Company, FitBand};
use outreach_client::{Feedback, QueryRecord};

pub fn print_banner(term: &Term) -> Result<()> {
    term.clear_screen()?;
    println!(
        "{}",
        "╔════════════════════════════════════════╗".bright_cyan()
    );
    println!(
        "{}",
        "║            Outreach Finder             ║".bright_cyan()
    );
    println!(
        "{}",
        "╚════════════════════════════════════════╝".bright_cyan()
    );
    println!();
    Ok(())
}

pub fn sign_in_hint() {
    println!(
        "{} {}",
        "Not signed in.".bright_yellow(),
        "Run `outreach signin` first.".dimmed()
    );
}

fn band(company: &Company) -> ColoredString {
    let label = company.fit_band().label();
    match company.fit_band() {
        FitBand::High => label.bright_green(),
        FitBand::Medium => label.bright_yellow(),
        FitBand::Low => label.bright_red(),
    }
}

/// One row of the results list.
pub fn company_line(company: &Company) -> String {
    format!(
        "{:>5.1}  {:<32} {}",
        company.fit_score,
        company.name,
        band(company)
    )
}

pub fn company_details(company: &Company, feedback: Option<Feedback>) {
    println!();
    println!("{}", company.name.bold());
    println!("{}", company.url.dimmed());
    println!("{} ({:.1})", band(company), company.fit_score);

    if !company.summary.is_empty() {
        println!();
        println!("{}", company.summary);
    }

    if !company.contacts.is_empty() {
        println!();
        println!("{}", "Contacts".bright_blue());
        for contact in &company.contacts {
            let fields: Vec<&str> = [
                contact.name.as_deref(),
                contact.designation.as_deref(),
                contact.email(),
                contact.phone.as_deref(),
            ]
            .into_iter()
            .flatten()
            .collect();
            println!("  {}", fields.join(" · "));
        }
    }

    if !company.socials.is_empty() {
        println!();
        println!("{}", "Socials".bright_blue());
        for link in &company.socials {
            println!("  {}", link);
        }
    }

    if let Some(feedback) = feedback {
        println!();
        println!("Your feedback: {}", feedback.as_str().bright_magenta());
    }
    println!();
}

/// One row of the query history.
pub fn history_line(record: &QueryRecord) -> String {
    format!(
        "{:>5}  {}  {}",
        record.id,
        record.created_at.format("%Y-%m-%d %H:%M"),
        record.query_text
    )
}
