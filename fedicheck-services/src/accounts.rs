//! Account endpoints under `/api/v1/accounts`.

use fedicheck_core::{bearer_header, Account, AuthContext, Status, Token};
use fedicheck_fetch::{
    AuthedRequestBuilder, FetchError, FormBody, HttpRequest, Method, QueryParams,
    RequestBuilder, ServiceContext,
};
use tracing::{info, instrument};

use crate::builders::CreateAccountForm;
use crate::pipeline::{execute_verified, fetch_json};
use crate::timelines::ACCEPT_JSON;

/// Base path of the account endpoints.
pub const ACCOUNTS_PATH: &str = "/api/v1/accounts";

/// Account registration, lookup and profile calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountService;

impl AccountService {
    /// Creates the service.
    pub fn new() -> Self {
        Self
    }

    fn url(ctx: &ServiceContext, suffix: &str) -> String {
        ctx.url(&format!("{ACCOUNTS_PATH}{suffix}"))
    }

    fn authed_get(ctx: &ServiceContext, auth: &AuthContext, suffix: &str) -> AuthedRequestBuilder {
        AuthedRequestBuilder::new(Self::url(ctx, suffix), Method::Get, auth)
            .with_header("accept", ACCEPT_JSON)
    }

    /// Registers a new account.
    ///
    /// Any valid Bearer token may authorize the call. Returns a context for
    /// the new account holding its email, password and the issued token.
    #[instrument(skip(self, ctx, auth, form), fields(username = %form.username()))]
    pub async fn register_account(
        &self,
        ctx: &ServiceContext,
        auth: &AuthContext,
        form: &CreateAccountForm,
    ) -> Result<AuthContext, FetchError> {
        let request = AuthedRequestBuilder::new(Self::url(ctx, ""), Method::Post, auth)
            .with_form_body(form.form().clone())
            .build();

        let response = execute_verified(ctx, &request, 200).await?;
        let token: Token = response.json()?;
        info!("Account registered");

        Ok(AuthContext::new(form.email(), form.password())
            .with_token(bearer_header(&token.access_token)))
    }

    /// Looks up an account by webfinger address. No authentication.
    #[instrument(skip(self, ctx))]
    pub async fn lookup_account(
        &self,
        ctx: &ServiceContext,
        acct: &str,
    ) -> Result<Account, FetchError> {
        let request = RequestBuilder::new(Self::url(ctx, "/lookup"), Method::Get)
            .with_query_param("acct", acct)
            .with_header("accept", ACCEPT_JSON)
            .build();
        fetch_json(ctx, &request).await
    }

    /// Returns the account owning the context's token.
    #[instrument(skip(self, ctx, auth), fields(username = %auth.username()))]
    pub async fn verify_credentials(
        &self,
        ctx: &ServiceContext,
        auth: &AuthContext,
    ) -> Result<Account, FetchError> {
        let request = Self::authed_get(ctx, auth, "/verify_credentials").build();
        fetch_json(ctx, &request).await
    }

    /// Updates the caller's profile and returns the updated account.
    #[instrument(skip(self, ctx, auth, form), fields(username = %auth.username(), fields = form.len()))]
    pub async fn update_credentials(
        &self,
        ctx: &ServiceContext,
        auth: &AuthContext,
        form: &FormBody,
    ) -> Result<Account, FetchError> {
        let request = AuthedRequestBuilder::new(
            Self::url(ctx, "/update_credentials"),
            Method::Patch,
            auth,
        )
        .with_form_body(form.clone())
        .build();
        fetch_json(ctx, &request).await
    }

    /// Fetches one account by id.
    #[instrument(skip(self, ctx, auth))]
    pub async fn get_account(
        &self,
        ctx: &ServiceContext,
        auth: &AuthContext,
        id: &str,
    ) -> Result<Account, FetchError> {
        let request = Self::authed_get(ctx, auth, &format!("/{id}")).build();
        fetch_json(ctx, &request).await
    }

    /// Fetches several accounts by id.
    #[instrument(skip(self, ctx, auth), fields(count = ids.len()))]
    pub async fn get_accounts(
        &self,
        ctx: &ServiceContext,
        auth: &AuthContext,
        ids: &[&str],
    ) -> Result<Vec<Account>, FetchError> {
        let request = Self::authed_get(ctx, auth, "")
            .with_query_param("id[]", ids)
            .build();
        fetch_json(ctx, &request).await
    }

    /// Fetches statuses posted by an account.
    #[instrument(skip(self, ctx, auth, query))]
    pub async fn get_account_statuses(
        &self,
        ctx: &ServiceContext,
        auth: &AuthContext,
        id: &str,
        query: Option<&QueryParams>,
    ) -> Result<Vec<Status>, FetchError> {
        let request = Self::paged(ctx, auth, &format!("/{id}/statuses"), query);
        fetch_json(ctx, &request).await
    }

    /// Fetches accounts following the given account.
    #[instrument(skip(self, ctx, auth, query))]
    pub async fn get_account_followers(
        &self,
        ctx: &ServiceContext,
        auth: &AuthContext,
        id: &str,
        query: Option<&QueryParams>,
    ) -> Result<Vec<Account>, FetchError> {
        let request = Self::paged(ctx, auth, &format!("/{id}/followers"), query);
        fetch_json(ctx, &request).await
    }

    /// Fetches accounts the given account follows.
    #[instrument(skip(self, ctx, auth, query))]
    pub async fn get_account_following(
        &self,
        ctx: &ServiceContext,
        auth: &AuthContext,
        id: &str,
        query: Option<&QueryParams>,
    ) -> Result<Vec<Account>, FetchError> {
        let request = Self::paged(ctx, auth, &format!("/{id}/following"), query);
        fetch_json(ctx, &request).await
    }

    fn paged(
        ctx: &ServiceContext,
        auth: &AuthContext,
        suffix: &str,
        query: Option<&QueryParams>,
    ) -> HttpRequest {
        Self::authed_get(ctx, auth, suffix)
            .with_optional_query(query)
            .build()
    }
}
