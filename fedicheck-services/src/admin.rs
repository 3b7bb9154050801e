//! Admin actions on the web UI under `/admin/accounts`.
//!
//! These pages have no API counterpart. They are driven with the admin's
//! session cookies only; a Bearer token on the same request is rejected.

use fedicheck_core::AuthContext;
use fedicheck_fetch::{AuthedRequestBuilder, ExtractionError, FetchError, Method, ServiceContext};
use tracing::{debug, info, instrument};

use crate::pipeline::execute_verified;
use crate::web::{refresh_auth_context, AUTHENTICITY_TOKEN_FIELD};

/// Base path of the admin account pages.
pub const ADMIN_ACCOUNTS_PATH: &str = "/admin/accounts";

/// Admin-only account management.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminAccountsService;

impl AdminAccountsService {
    /// Creates the service.
    pub fn new() -> Self {
        Self
    }

    /// Confirms a pending account's email on the admin's behalf.
    ///
    /// Loads the account page for a fresh CSRF token, then submits the
    /// confirmation form. Returns the admin context with the rotated
    /// session cookies, which the caller should use from here on.
    #[instrument(skip(self, ctx, admin), fields(admin = %admin.username()))]
    pub async fn confirm_account(
        &self,
        ctx: &ServiceContext,
        admin: &AuthContext,
        id: &str,
    ) -> Result<AuthContext, FetchError> {
        let page_url = ctx.url(&format!("{ADMIN_ACCOUNTS_PATH}/{id}"));

        debug!(url = %page_url, "Fetching CSRF token");
        let page_request = AuthedRequestBuilder::new(&page_url, Method::Get, admin)
            .only_cookies()
            .build();
        let page = execute_verified(ctx, &page_request, 200).await?;
        let refreshed = refresh_auth_context(admin, &page, true)?;
        let csrf = refreshed
            .csrf()
            .ok_or(ExtractionError::CsrfTokenNotFound)?
            .to_string();

        let confirm_request = AuthedRequestBuilder::new(
            format!("{page_url}/confirmation"),
            Method::Post,
            &refreshed,
        )
        .only_cookies()
        .with_form_field("_method", "post")
        .with_form_field(AUTHENTICITY_TOKEN_FIELD, csrf)
        .build();
        let response = execute_verified(ctx, &confirm_request, 302).await?;

        info!("Account confirmed");
        refresh_auth_context(&refreshed, &response, false)
    }
}
