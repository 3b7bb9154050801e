//! Sign-in protocol.
//!
//! Signing in walks the same path a browser does:
//!
//! 1. GET the login form, keep its session cookie and CSRF token.
//! 2. POST the credentials with that token; the response rotates the
//!    session cookie.
//! 3. Optionally GET the web client and scrape the access token the page
//!    embeds for its own API calls.
//!
//! Every call starts from a fresh login form. Nothing is cached and a
//! failed attempt returns no context at all.

use fedicheck_core::{bearer_header, AuthContext};
use fedicheck_fetch::{
    extract_bearer_token, extract_csrf, AuthedRequestBuilder, ExpectedStatus, FetchError,
    Method, RequestBuilder, ServiceContext,
};
use tracing::{debug, info, instrument, warn};

use crate::pipeline::execute_verified;
use crate::web::{refresh_auth_context, AUTHENTICITY_TOKEN_FIELD};

// ============================================================================
// Constants
// ============================================================================

/// Login form and submission endpoint.
pub const SIGN_IN_PATH: &str = "/auth/sign_in";

/// Web client page carrying the initial state.
pub const WEB_HOME_PATH: &str = "/";

/// Statuses that mean the login form was accepted.
const SIGN_IN_ACCEPTED: [u16; 2] = [200, 302];

// ============================================================================
// Options
// ============================================================================

/// Controls how far [`AuthenticationService::sign_in_with`] goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignInOptions {
    /// Scrape a Bearer token from the web client after signing in.
    pub derive_token: bool,
}

impl SignInOptions {
    /// Session cookies only, no token.
    pub fn session_only() -> Self {
        Self {
            derive_token: false,
        }
    }
}

impl Default for SignInOptions {
    fn default() -> Self {
        Self { derive_token: true }
    }
}

// ============================================================================
// Authentication Service
// ============================================================================

/// Signs users in through the web login form.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthenticationService;

impl AuthenticationService {
    /// Creates the service.
    pub fn new() -> Self {
        Self
    }

    /// Signs in and derives a Bearer token.
    pub async fn sign_in(
        &self,
        ctx: &ServiceContext,
        username: &str,
        password: &str,
    ) -> Result<AuthContext, FetchError> {
        self.sign_in_with(ctx, username, password, SignInOptions::default())
            .await
    }

    /// Signs in with explicit options.
    #[instrument(skip(self, ctx, password, options), fields(derive_token = options.derive_token))]
    pub async fn sign_in_with(
        &self,
        ctx: &ServiceContext,
        username: &str,
        password: &str,
        options: SignInOptions,
    ) -> Result<AuthContext, FetchError> {
        let auth = self
            .open_session(ctx, AuthContext::new(username, password))
            .await?;

        let auth = if options.derive_token {
            self.derive_token(ctx, &auth).await?
        } else {
            auth
        };

        info!(has_token = auth.has_token(), "Signed in");
        Ok(auth)
    }

    /// Opens a new web session for an existing context.
    ///
    /// The context's token is kept and no new one is derived. Use this when
    /// the session cookies have gone stale but the token is still valid.
    #[instrument(skip(self, ctx, auth), fields(username = %auth.username()))]
    pub async fn refresh_session(
        &self,
        ctx: &ServiceContext,
        auth: &AuthContext,
    ) -> Result<AuthContext, FetchError> {
        let session = self
            .open_session(ctx, AuthContext::new(auth.username(), auth.password()))
            .await?;

        info!("Session refreshed");
        Ok(match auth.token() {
            Some(token) => session.with_token(token),
            None => session,
        })
    }

    /// Steps 1 and 2: login form, then credential submission.
    ///
    /// The form page may answer with any 2xx.
    async fn open_session(
        &self,
        ctx: &ServiceContext,
        auth: AuthContext,
    ) -> Result<AuthContext, FetchError> {
        let url = ctx.url(SIGN_IN_PATH);

        let form_request = RequestBuilder::new(&url, Method::Get).build();
        let form_page = execute_verified(ctx, &form_request, ExpectedStatus::success()).await?;
        let csrf = extract_csrf(&form_page.body)?;
        let cookies = form_page.cookies;
        debug!(cookies = cookies.len(), "Login form loaded");

        let submit = RequestBuilder::new(&url, Method::Post)
            .with_form_field(AUTHENTICITY_TOKEN_FIELD, csrf)
            .with_form_field("user[email]", auth.username())
            .with_form_field("user[password]", auth.password())
            .with_form_field("button", "")
            .with_session_cookies(cookies.clone())
            .build();
        let response = ctx.transport().execute(&submit).await?;

        if !SIGN_IN_ACCEPTED.contains(&response.status) {
            warn!(status = response.status, "Login form rejected");
            return Err(FetchError::AuthenticationFailed {
                status: response.status,
                body: response.body,
            });
        }

        let cookies = cookies.merge(&response.cookies);
        debug!(cookies = cookies.len(), "Session established");
        Ok(auth.with_session_cookies(cookies))
    }

    /// Step 3: scrape the web client's token.
    async fn derive_token(
        &self,
        ctx: &ServiceContext,
        auth: &AuthContext,
    ) -> Result<AuthContext, FetchError> {
        if auth.has_token() {
            return Ok(auth.clone());
        }

        let request = AuthedRequestBuilder::new(ctx.url(WEB_HOME_PATH), Method::Get, auth)
            .only_cookies()
            .build();
        let page = execute_verified(ctx, &request, 200).await?;
        let raw_token = extract_bearer_token(&page.body)?;
        debug!("Bearer token derived from web client");

        Ok(refresh_auth_context(auth, &page, false)?.with_token(bearer_header(&raw_token)))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fedicheck_fetch::testing::ScriptedTransport;
    use fedicheck_fetch::{ExtractionError, HttpResponse};

    use super::*;

    const LOGIN_FORM: &str = r#"<html><head><meta name="csrf-token" content="form-csrf"></head></html>"#;
    const WEB_CLIENT: &str =
        r#"<html><body><script id="initial-state" type="application/json">{"meta":{"access_token":"tok"}}</script></body></html>"#;

    fn context(transport: &Arc<ScriptedTransport>) -> ServiceContext {
        ServiceContext::new(transport.clone(), "http://localhost:3000")
    }

    fn login_form() -> HttpResponse {
        HttpResponse::new(200, LOGIN_FORM).with_cookie("_mastodon_session", "form")
    }

    fn accepted() -> HttpResponse {
        HttpResponse::new(302, "")
            .with_header("location", "/")
            .with_cookie("_mastodon_session", "signed-in")
    }

    #[tokio::test]
    async fn test_sign_in_derives_token() {
        let transport = Arc::new(ScriptedTransport::new([
            login_form(),
            accepted(),
            HttpResponse::new(200, WEB_CLIENT),
        ]));
        let ctx = context(&transport);

        let auth = AuthenticationService::new()
            .sign_in(&ctx, "admin@localhost", "pw")
            .await
            .unwrap();

        assert_eq!(auth.token(), Some("Bearer tok"));
        assert_eq!(auth.bearer_token(), Some("tok"));
        assert_eq!(
            auth.session_cookies().and_then(|c| c.get("_mastodon_session")),
            Some("signed-in")
        );
        assert!(auth.csrf().is_none());

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);

        let submit = &requests[1];
        assert_eq!(submit.method, Method::Post);
        assert_eq!(submit.url, "http://localhost:3000/auth/sign_in");
        assert_eq!(submit.header("cookie"), Some("_mastodon_session=form"));
        let form = submit.form.as_ref().unwrap();
        assert_eq!(form.get("authenticity_token"), Some("form-csrf"));
        assert_eq!(form.get("user[email]"), Some("admin@localhost"));
        assert_eq!(form.get("user[password]"), Some("pw"));
        assert_eq!(form.get("button"), Some(""));

        let home = &requests[2];
        assert_eq!(home.url, "http://localhost:3000/");
        assert_eq!(home.header("cookie"), Some("_mastodon_session=signed-in"));
        assert!(home.header("authorization").is_none());
    }

    #[tokio::test]
    async fn test_sign_in_session_only() {
        let transport = Arc::new(ScriptedTransport::new([login_form(), accepted()]));
        let ctx = context(&transport);

        let auth = AuthenticationService::new()
            .sign_in_with(&ctx, "admin@localhost", "pw", SignInOptions::session_only())
            .await
            .unwrap();

        assert!(!auth.has_token());
        assert!(auth.has_session());
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_sign_in_accepts_200() {
        let transport = Arc::new(ScriptedTransport::new([
            login_form(),
            HttpResponse::new(200, "").with_cookie("remember_user_token", "r"),
        ]));
        let ctx = context(&transport);

        let auth = AuthenticationService::new()
            .sign_in_with(&ctx, "u", "p", SignInOptions::session_only())
            .await
            .unwrap();

        let cookies = auth.session_cookies().unwrap();
        assert_eq!(cookies.get("_mastodon_session"), Some("form"));
        assert_eq!(cookies.get("remember_user_token"), Some("r"));
    }

    #[tokio::test]
    async fn test_login_form_any_2xx() {
        let transport = Arc::new(ScriptedTransport::new([
            HttpResponse::new(203, LOGIN_FORM).with_cookie("_mastodon_session", "form"),
            accepted(),
        ]));
        let ctx = context(&transport);

        let auth = AuthenticationService::new()
            .sign_in_with(&ctx, "u", "p", SignInOptions::session_only())
            .await
            .unwrap();

        assert!(auth.has_session());
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_credentials() {
        let transport = Arc::new(ScriptedTransport::new([
            login_form(),
            HttpResponse::new(422, "Invalid Email or password."),
        ]));
        let ctx = context(&transport);

        let result = AuthenticationService::new()
            .sign_in(&ctx, "admin@localhost", "wrong")
            .await;

        match result {
            Err(FetchError::AuthenticationFailed { status, body }) => {
                assert_eq!(status, 422);
                assert!(body.contains("Invalid"));
            }
            other => panic!("expected AuthenticationFailed, got {other:?}"),
        }
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_login_form_unavailable() {
        let transport = Arc::new(ScriptedTransport::new([HttpResponse::new(503, "down")]));
        let ctx = context(&transport);

        let result = AuthenticationService::new().sign_in(&ctx, "u", "p").await;
        assert!(matches!(
            result,
            Err(FetchError::UnexpectedStatus { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_login_form_without_csrf() {
        let transport = Arc::new(ScriptedTransport::new([HttpResponse::new(200, "<html></html>")]));
        let ctx = context(&transport);

        let result = AuthenticationService::new().sign_in(&ctx, "u", "p").await;
        assert!(matches!(
            result,
            Err(FetchError::CredentialExtraction(ExtractionError::CsrfTokenNotFound))
        ));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_web_client_without_token() {
        let transport = Arc::new(ScriptedTransport::new([
            login_form(),
            accepted(),
            HttpResponse::new(200, "<html><body></body></html>"),
        ]));
        let ctx = context(&transport);

        let result = AuthenticationService::new().sign_in(&ctx, "u", "p").await;
        assert!(matches!(
            result,
            Err(FetchError::CredentialExtraction(
                ExtractionError::InitialStateNotFound
            ))
        ));
    }

    #[tokio::test]
    async fn test_refresh_session_keeps_token() {
        let transport = Arc::new(ScriptedTransport::new([login_form(), accepted()]));
        let ctx = context(&transport);
        let stale = AuthContext::new("alice@fedi.test", "pw").with_token("Bearer old");

        let fresh = AuthenticationService::new()
            .refresh_session(&ctx, &stale)
            .await
            .unwrap();

        assert_eq!(fresh.token(), Some("Bearer old"));
        assert_eq!(fresh.username(), "alice@fedi.test");
        assert!(fresh.has_session());
        assert_eq!(transport.requests().len(), 2);
    }
}
