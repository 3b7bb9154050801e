//! Execute, verify, parse.
//!
//! Every service call ends here so no body is parsed before its status has
//! been checked.

use fedicheck_core::Validate;
use fedicheck_fetch::{
    verify_status, ExpectedStatus, FetchError, HttpRequest, HttpResponse, ServiceContext,
};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Executes `request` and checks the status against `expected`.
pub(crate) async fn execute_verified(
    ctx: &ServiceContext,
    request: &HttpRequest,
    expected: impl Into<ExpectedStatus>,
) -> Result<HttpResponse, FetchError> {
    let response = ctx.transport().execute(request).await?;
    verify_status(expected, &response)?;
    Ok(response)
}

/// Executes `request`, requires a 200, decodes the JSON body and checks its
/// closed-set fields.
pub(crate) async fn fetch_json<T: DeserializeOwned + Validate>(
    ctx: &ServiceContext,
    request: &HttpRequest,
) -> Result<T, FetchError> {
    let response = execute_verified(ctx, request, 200).await?;
    debug!(len = response.body.len(), "Decoding JSON body");
    let value: T = response.json()?;
    value.validate()?;
    Ok(value)
}
