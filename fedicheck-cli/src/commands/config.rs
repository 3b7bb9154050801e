//! Config command - show the effective configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use fedicheck_config::default_config_path;

use super::load_config;
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the configuration after file, environment and flags.
    Show,

    /// Show the default configuration path.
    Path,
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match args.action {
        ConfigAction::Show => show_config(cli),
        ConfigAction::Path => {
            println!("{}", default_config_path().display());
            Ok(())
        }
    }
}

fn show_config(cli: &Cli) -> Result<()> {
    let mut config = load_config(cli)?;
    config.admin.password = "********".to_string();

    match cli.format {
        OutputFormat::Text => {
            println!("fedicheck configuration");
            println!("{}", "─".repeat(40));
            println!("Base URL:       {}", config.environment.base_url);
            println!("Timeout:        {}s", config.environment.timeout_secs);
            println!("Admin username: {}", config.admin.username);
            println!("Admin password: {}", config.admin.password);
        }
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format(&config)?),
    }
    Ok(())
}
