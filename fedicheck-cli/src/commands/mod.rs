//! CLI command implementations.

pub mod account;
pub mod auth;
pub mod config;
pub mod smoke;
pub mod timeline;

use anyhow::{Context, Result};
use fedicheck_config::Config;
use fedicheck_fetch::ServiceContext;
use fedicheck_services::TestFixture;
use tracing::debug;

use crate::Cli;

/// Loads the configuration, applying `--base-url` last.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(base_url) = &cli.base_url {
        config.environment.base_url.clone_from(base_url);
        config.validate().context("validating --base-url")?;
    }
    Ok(config)
}

/// Builds the service context for the configured instance.
pub fn service_context(config: &Config) -> Result<ServiceContext> {
    debug!(base_url = %config.environment.base_url, "Building service context");
    ServiceContext::builder()
        .base_url(config.environment.base_url.clone())
        .timeout(config.timeout())
        .build()
        .context("building HTTP client")
}

/// A fixture signed in as the configured admin on first use.
pub fn fixture(cli: &Cli) -> Result<TestFixture> {
    let config = load_config(cli)?;
    let ctx = service_context(&config)?;
    Ok(TestFixture::new(
        ctx,
        config.admin.username,
        config.admin.password,
    ))
}
