//! Web session helpers.
//!
//! Web-only endpoints follow the same rhythm: GET the page, take the CSRF
//! token from it, absorb the rotated session cookie, then submit the form.
//! The session cookie changes on every response and a stale one is
//! rejected, so each step threads a fresh [`AuthContext`] forward.

use fedicheck_core::AuthContext;
use fedicheck_fetch::{extract_csrf, FetchError, HttpResponse};

/// Form field carrying the CSRF token.
pub const AUTHENTICITY_TOKEN_FIELD: &str = "authenticity_token";

/// Returns `auth` with the response's cookies merged over its own and, when
/// `require_csrf` is set, the CSRF token scraped from the response body.
///
/// Token and login pair are carried over unchanged.
pub fn refresh_auth_context(
    auth: &AuthContext,
    response: &HttpResponse,
    require_csrf: bool,
) -> Result<AuthContext, FetchError> {
    let cookies = auth
        .session_cookies()
        .cloned()
        .unwrap_or_default()
        .merge(&response.cookies);
    let refreshed = auth.with_session_cookies(cookies);

    if !require_csrf {
        return Ok(refreshed);
    }
    let csrf = extract_csrf(&response.body)?;
    Ok(refreshed.with_csrf(csrf))
}
