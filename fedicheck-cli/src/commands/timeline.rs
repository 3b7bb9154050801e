//! Timeline command.

use anyhow::Result;
use clap::{Args, Subcommand};
use fedicheck_services::{AuthenticationService, TimelineQueryBuilder, TimelineService};

use super::{load_config, service_context};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the timeline command.
#[derive(Args)]
pub struct TimelineArgs {
    #[command(subcommand)]
    pub kind: TimelineKind,

    /// Maximum number of statuses.
    #[arg(long, short = 'n', global = true)]
    pub limit: Option<u32>,

    /// Only statuses from this instance.
    #[arg(long, global = true)]
    pub local: bool,
}

/// Timeline kinds.
#[derive(Subcommand)]
pub enum TimelineKind {
    /// Public timeline. No authentication.
    Public,

    /// Statuses with a hashtag. No authentication.
    Hashtag {
        /// Tag, with or without `#`.
        tag: String,
    },

    /// Home timeline of a signed-in user.
    Home {
        /// Login email. Defaults to the configured admin.
        #[arg(long, short)]
        username: Option<String>,

        /// Password. Defaults to the configured admin's.
        #[arg(long, short)]
        password: Option<String>,
    },
}

/// Runs the timeline command.
pub async fn run(args: &TimelineArgs, cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let ctx = service_context(&config)?;

    let mut query = TimelineQueryBuilder::new();
    if let Some(limit) = args.limit {
        query = query.with_limit(limit.to_string());
    }
    if args.local {
        query = query.set_local();
    }
    let query = query.build();

    let timelines = TimelineService::new();
    let statuses = match &args.kind {
        TimelineKind::Public => timelines.public_timeline(&ctx, Some(&query)).await?,
        TimelineKind::Hashtag { tag } => {
            timelines.hashtag_timeline(&ctx, tag, Some(&query)).await?
        }
        TimelineKind::Home { username, password } => {
            let username = username.as_deref().unwrap_or(&config.admin.username);
            let password = password.as_deref().unwrap_or(&config.admin.password);
            let auth = AuthenticationService::new()
                .sign_in(&ctx, username, password)
                .await?;
            timelines.home_timeline(&ctx, &auth, Some(&query)).await?
        }
    };

    match cli.format {
        OutputFormat::Text => {
            println!("{}", TextFormatter::new(!cli.no_color).format_statuses(&statuses));
        }
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format(&statuses)?),
    }
    Ok(())
}
