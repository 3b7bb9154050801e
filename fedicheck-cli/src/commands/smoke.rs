//! Smoke command - one full pass through the instance.
//!
//! Signs in as the admin, registers and confirms a random account, signs in
//! as that account and checks that its token resolves to the same username.
//! Stops at the first failing step.

use anyhow::{anyhow, Result};
use fedicheck_fetch::FetchError;
use fedicheck_services::{
    random_account_form, AccountService, AuthenticationService, TestFixture,
    TimelineQueryBuilder, TimelineService,
};
use tracing::{info, warn};

use super::fixture;
use crate::output::{JsonFormatter, SmokeOutput, StepOutput, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the smoke command.
pub async fn run(cli: &Cli) -> Result<()> {
    let fixture = fixture(cli)?;
    let mut report = SmokeOutput {
        base_url: fixture.ctx().base_url().to_string(),
        steps: Vec::new(),
    };

    let outcome = steps(&fixture, &mut report).await;

    match cli.format {
        OutputFormat::Text => println!("{}", TextFormatter::new(!cli.no_color).format_smoke(&report)),
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format(&report)?),
    }

    outcome
}

async fn steps(fixture: &TestFixture, report: &mut SmokeOutput) -> Result<()> {
    let admin = record(report, "admin sign-in", fixture.admin_auth().await)?;
    let admin_name = admin.username().to_string();
    pass(report, "admin sign-in", Some(admin_name));

    let form = random_account_form()?;
    let created = record(
        report,
        "register and confirm",
        fixture.create_confirmed_account(&form).await,
    )?;
    let account = &created.account;
    pass(
        report,
        "register and confirm",
        Some(format!("@{} (id {})", account.username, account.id)),
    );

    let user = record(
        report,
        "user sign-in",
        AuthenticationService::new()
            .sign_in(fixture.ctx(), form.email(), form.password())
            .await,
    )?;
    pass(report, "user sign-in", None);

    let me = record(
        report,
        "verify credentials",
        AccountService::new().verify_credentials(fixture.ctx(), &user).await,
    )?;
    if me.username != form.username() {
        let detail = format!("expected @{}, got @{}", form.username(), me.username);
        fail(report, "verify credentials", &detail);
        return Err(anyhow!("verify credentials: {detail}"));
    }
    pass(report, "verify credentials", Some(format!("@{}", me.username)));

    let query = TimelineQueryBuilder::new().with_limit("1").build();
    let statuses = record(
        report,
        "public timeline",
        TimelineService::new().public_timeline(fixture.ctx(), Some(&query)).await,
    )?;
    pass(report, "public timeline", Some(format!("{} status(es)", statuses.len())));

    info!("Smoke test passed");
    Ok(())
}

/// Records a failed step and converts the error; successes are recorded by
/// the caller once it has a detail to show.
fn record<T>(report: &mut SmokeOutput, name: &str, result: Result<T, FetchError>) -> Result<T> {
    result.map_err(|err| {
        fail(report, name, &err.to_string());
        anyhow::Error::new(err).context(format!("smoke step '{name}'"))
    })
}

fn pass(report: &mut SmokeOutput, name: &str, detail: Option<String>) {
    report.steps.push(StepOutput {
        name: name.to_string(),
        ok: true,
        detail,
    });
}

fn fail(report: &mut SmokeOutput, name: &str, detail: &str) {
    warn!(step = name, error = detail, "Smoke step failed");
    report.steps.push(StepOutput {
        name: name.to_string(),
        ok: false,
        detail: Some(detail.to_string()),
    });
}
