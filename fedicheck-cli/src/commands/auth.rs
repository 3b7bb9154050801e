//! Sign-in command.

use anyhow::Result;
use clap::Args;
use fedicheck_services::{AuthenticationService, SignInOptions};
use tracing::info;

use super::{load_config, service_context};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the sign-in command.
#[derive(Args)]
pub struct SignInArgs {
    /// Login email. Defaults to the configured admin.
    #[arg(long, short)]
    pub username: Option<String>,

    /// Password. Defaults to the configured admin's.
    #[arg(long, short)]
    pub password: Option<String>,

    /// Stop after the session cookies; do not scrape a token.
    #[arg(long)]
    pub no_token: bool,
}

/// Runs the sign-in command.
pub async fn run(args: &SignInArgs, cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let ctx = service_context(&config)?;

    let username = args.username.as_deref().unwrap_or(&config.admin.username);
    let password = args.password.as_deref().unwrap_or(&config.admin.password);
    let options = if args.no_token {
        SignInOptions::session_only()
    } else {
        SignInOptions::default()
    };

    info!(username, "Signing in");
    let auth = AuthenticationService::new()
        .sign_in_with(&ctx, username, password, options)
        .await?;

    match cli.format {
        OutputFormat::Text => println!("{}", TextFormatter::new(!cli.no_color).format_auth(&auth)),
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format_auth(&auth)?),
    }
    Ok(())
}
