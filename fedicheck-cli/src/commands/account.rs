//! Account commands: lookup, register, confirm.

use anyhow::{Context, Result};
use clap::Args;
use fedicheck_core::Account;
use fedicheck_services::{AccountService, AdminAccountsService, CreateAccountFormBuilder};
use tracing::info;

use super::{fixture, load_config, service_context};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the lookup command.
#[derive(Args)]
pub struct LookupArgs {
    /// Account address, `user` or `user@domain`.
    pub acct: String,
}

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    /// Username (local part only).
    #[arg(long)]
    pub username: String,

    /// Email address.
    #[arg(long)]
    pub email: String,

    /// Password.
    #[arg(long)]
    pub password: String,

    /// Locale sent with the form.
    #[arg(long, default_value = "EN")]
    pub locale: String,

    /// Reason, for instances that review sign-ups.
    #[arg(long)]
    pub reason: Option<String>,

    /// Confirm the account right away.
    #[arg(long)]
    pub confirm: bool,
}

/// Arguments for the confirm command.
#[derive(Args)]
pub struct ConfirmArgs {
    /// Account id.
    pub id: String,
}

/// Looks up an account anonymously.
pub async fn lookup(args: &LookupArgs, cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let ctx = service_context(&config)?;

    let account = AccountService::new().lookup_account(&ctx, &args.acct).await?;
    print_account(&account, cli)
}

/// Registers an account with the admin's token.
pub async fn register(args: &RegisterArgs, cli: &Cli) -> Result<()> {
    let fixture = fixture(cli)?;

    let mut builder = CreateAccountFormBuilder::new()
        .with_username(&args.username)
        .with_email(&args.email)
        .with_password(&args.password)
        .with_locale(&args.locale)
        .set_agreement(true);
    if let Some(reason) = &args.reason {
        builder = builder.with_reason(reason);
    }
    let form = builder.build()?;

    let account = if args.confirm {
        fixture.create_confirmed_account(&form).await?.account
    } else {
        let admin = fixture.admin_auth().await.context("signing in as admin")?;
        let accounts = AccountService::new();
        accounts.register_account(fixture.ctx(), admin, &form).await?;
        accounts.lookup_account(fixture.ctx(), form.username()).await?
    };

    info!(id = %account.id, "Registered");
    print_account(&account, cli)
}

/// Confirms an account from the admin pages.
pub async fn confirm(args: &ConfirmArgs, cli: &Cli) -> Result<()> {
    let fixture = fixture(cli)?;
    let admin = fixture.admin_auth().await.context("signing in as admin")?;

    AdminAccountsService::new()
        .confirm_account(fixture.ctx(), admin, &args.id)
        .await?;

    match cli.format {
        OutputFormat::Text => println!("Confirmed account {}", args.id),
        OutputFormat::Json => println!(
            "{}",
            JsonFormatter::new(cli.pretty)
                .format(&serde_json::json!({ "id": args.id, "confirmed": true }))?
        ),
    }
    Ok(())
}

fn print_account(account: &Account, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => println!("{}", TextFormatter::new(!cli.no_color).format_account(account)),
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format(account)?),
    }
    Ok(())
}
