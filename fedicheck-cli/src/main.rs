// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! fedicheck - drive a Mastodon instance the way its web client does.
//!
//! # Examples
//!
//! ```bash
//! # Sign in and print the derived Bearer token
//! fedicheck sign-in --username alice@localhost --password secret
//!
//! # Look up an account
//! fedicheck lookup alice
//!
//! # Register and confirm an account as the configured admin
//! fedicheck register --username bob --email bob@fedi.test --password hunter22
//! fedicheck confirm 110
//!
//! # Timelines
//! fedicheck timeline public --limit 5 --local
//! fedicheck timeline hashtag rust
//!
//! # Full sign-in/register/confirm round trip
//! fedicheck smoke --format json
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use fedicheck_config::ConfigError;
use fedicheck_fetch::FetchError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{account, auth, config, smoke, timeline};

// ============================================================================
// CLI Definition
// ============================================================================

/// fedicheck - Mastodon test-automation client.
#[derive(Parser)]
#[command(name = "fedicheck")]
#[command(about = "Mastodon test-automation client")]
#[command(long_about = r#"
fedicheck signs in through the web login form, scrapes the tokens the web
client uses, and drives the REST API and admin pages of a Mastodon instance.

Examples:
  fedicheck sign-in -u alice@localhost -p secret
  fedicheck lookup alice
  fedicheck timeline public --limit 5
  fedicheck smoke
"#)]
#[command(version)]
#[command(author = "Fedicheck Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (YAML).
    #[arg(long, short = 'c', global = true, env = "FEDICHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the instance, overriding the configuration.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no logging, no error text).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Sign in through the web login form.
    SignIn(auth::SignInArgs),

    /// Look up an account by acct.
    Lookup(account::LookupArgs),

    /// Register a new account using the admin's token.
    Register(account::RegisterArgs),

    /// Confirm an account's email from the admin pages.
    Confirm(account::ConfirmArgs),

    /// Fetch a timeline.
    #[command(visible_alias = "tl")]
    Timeline(timeline::TimelineArgs),

    /// Register, confirm and sign in a throwaway account end to end.
    Smoke,

    /// Show the effective configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Configuration could not be loaded.
    ConfigError = 2,
    /// The login form rejected the credentials.
    AuthenticationFailed = 3,
    /// The server answered with an unexpected status.
    UnexpectedStatus = 4,
    /// A page lacked the CSRF token or initial state.
    ExtractionFailed = 5,
    /// Transport failure.
    NetworkError = 6,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    pub fn for_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if cause.downcast_ref::<ConfigError>().is_some() {
                return Self::ConfigError;
            }
            if let Some(fetch) = cause.downcast_ref::<FetchError>() {
                return match fetch {
                    FetchError::AuthenticationFailed { .. } => Self::AuthenticationFailed,
                    FetchError::UnexpectedStatus { .. } => Self::UnexpectedStatus,
                    FetchError::CredentialExtraction(_) => Self::ExtractionFailed,
                    FetchError::Http(_) => Self::NetworkError,
                    _ => Self::Error,
                };
            }
        }
        Self::Error
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let default = if verbose { "fedicheck=debug,info" } else { "fedicheck=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result: Result<()> = match &cli.command {
        Commands::SignIn(args) => auth::run(args, &cli).await,
        Commands::Lookup(args) => account::lookup(args, &cli).await,
        Commands::Register(args) => account::register(args, &cli).await,
        Commands::Confirm(args) => account::confirm(args, &cli).await,
        Commands::Timeline(args) => timeline::run(args, &cli).await,
        Commands::Smoke => smoke::run(&cli).await,
        Commands::Config(args) => config::run(args, &cli),
    };

    let code = match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            ExitCode::for_error(&e)
        }
    };
    std::process::exit(code as i32);
}
