//! Outreach command-line client
//!
//! Sign in, describe the companies you want to reach, and work through the
//! ranked results: details, feedback and generated outreach emails.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use outreach_app::pages::process::{ExtractionMode, DEFAULT_DEMO_DELAY};
use outreach_app::AppConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cmd;
mod compose;
mod context;
mod render;

use context::CliContext;

#[derive(Parser)]
#[command(name = "outreach")]
#[command(about = "Find companies that fit a query and draft outreach emails")]
#[command(version)]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "OUTREACH_API_URL")]
    api_url: Option<String>,

    /// Directory holding the saved session
    #[arg(long, global = true, env = "OUTREACH_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Skip the extraction call and show stored results after a short wait
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Signin {
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Create an account
    Signup {
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Forget the saved credentials
    Logout,

    /// Show who is signed in
    Whoami,

    /// Run a search and browse the results
    Search {
        /// What to look for, e.g. "payroll startups in Berlin"
        query: Vec<String>,

        /// File to list alongside the query (names only, never uploaded)
        #[arg(short, long = "attach")]
        attach: Vec<PathBuf>,
    },

    /// Browse the results of the last search, or of an earlier one
    Results {
        #[arg(long)]
        query_id: Option<i64>,
    },

    /// List earlier searches
    History {
        /// Pick one and browse its results
        #[arg(short, long)]
        open: bool,
    },

    /// Go straight to a client path, e.g. "/results?query_id=12"
    Open { path: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present, before clap reads the environment
    let _ = dotenvy::dotenv();

    // Logs go to stderr so they never mix with prompts
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,outreach=info,outreach_app=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".bright_red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::from_env().context("Failed to load configuration")?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url.trim_end_matches('/').to_string();
    }
    if let Some(state_dir) = cli.state_dir {
        config.state_dir = state_dir;
    }
    if cli.demo && config.extraction_mode == ExtractionMode::Live {
        config.extraction_mode = ExtractionMode::FixedDelay(DEFAULT_DEMO_DELAY);
    }

    let ctx = CliContext::new(config)?;

    match cli.command {
        None => cmd::menu::run(&ctx).await,
        Some(Commands::Signin { email }) => cmd::auth::sign_in(&ctx, email).await,
        Some(Commands::Signup { email }) => cmd::auth::sign_up(&ctx, email).await,
        Some(Commands::Logout) => {
            cmd::auth::logout(&ctx);
            Ok(())
        }
        Some(Commands::Whoami) => {
            cmd::auth::whoami(&ctx);
            Ok(())
        }
        Some(Commands::Search { query, attach }) => {
            let query = (!query.is_empty()).then(|| query.join(" "));
            cmd::search::run(&ctx, query, attach).await
        }
        Some(Commands::Results { query_id }) => cmd::results::browse(&ctx, query_id).await,
        Some(Commands::History { open }) => cmd::history::run(&ctx, open).await,
        Some(Commands::Open { path }) => cmd::open::run(&ctx, &path).await,
    }
}
