//! Identity and credential bundle.
//!
//! An [`AuthContext`] carries everything a request needs to act as a user:
//! the login pair, an optional Bearer token for the REST API, and the web
//! session (cookies plus CSRF token) for form endpoints.
//!
//! The server rotates its session cookie on every response, so a context is
//! never updated in place. Each `with_*` call returns a new context and the
//! caller threads it into the next request.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix of an `Authorization` header value carrying a Bearer token.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Formats a raw access token as an `Authorization` header value.
pub fn bearer_header(raw_token: &str) -> String {
    format!("{BEARER_PREFIX}{raw_token}")
}

// ============================================================================
// Cookie Jar
// ============================================================================

/// Session cookies keyed by cookie name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CookieJar(BTreeMap<String, String>);

impl CookieJar {
    /// Creates an empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a cookie.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Returns the value of a cookie.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns true if the jar holds a cookie with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of cookies.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the jar is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns a new jar holding these cookies overlaid with `newer`.
    ///
    /// Cookies in `newer` win on name collision.
    #[must_use]
    pub fn merge(&self, newer: &CookieJar) -> CookieJar {
        let mut merged = self.0.clone();
        merged.extend(newer.0.iter().map(|(k, v)| (k.clone(), v.clone())));
        CookieJar(merged)
    }

    /// Renders the jar as a `Cookie` header value (`a=1; b=2`).
    pub fn header_value(&self) -> String {
        self.0
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CookieJar {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        CookieJar(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ============================================================================
// Auth Context
// ============================================================================

/// Identity plus credentials for one user.
///
/// `username` and `password` are fixed at construction; derived contexts
/// carry them unchanged. A context used for API calls needs a token, one
/// used for web forms needs session cookies (and a CSRF token for
/// state-changing requests). Both may be present.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
    username: String,
    password: String,
    token: Option<String>,
    session_cookies: Option<CookieJar>,
    csrf: Option<String>,
}

impl AuthContext {
    /// Creates a context holding only the login pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            token: None,
            session_cookies: None,
            csrf: None,
        }
    }

    /// Login name (an email address for web sign-in).
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Login password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Full `Authorization` header value (`Bearer <token>`), if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The token without its `Bearer ` prefix.
    pub fn bearer_token(&self) -> Option<&str> {
        self.token
            .as_deref()
            .map(|t| t.strip_prefix(BEARER_PREFIX).unwrap_or(t))
    }

    /// Web session cookies, if any.
    pub fn session_cookies(&self) -> Option<&CookieJar> {
        self.session_cookies.as_ref()
    }

    /// CSRF token for the next state-changing web request, if any.
    pub fn csrf(&self) -> Option<&str> {
        self.csrf.as_deref()
    }

    /// Returns true if a Bearer token is present.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Returns true if a non-empty cookie session is present.
    pub fn has_session(&self) -> bool {
        self.session_cookies.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Returns a copy with the token replaced.
    #[must_use]
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..self.clone()
        }
    }

    /// Returns a copy with the session cookies replaced wholesale.
    ///
    /// Nothing is merged here: callers that need to keep older cookies
    /// should [`CookieJar::merge`] first.
    #[must_use]
    pub fn with_session_cookies(&self, cookies: CookieJar) -> Self {
        Self {
            session_cookies: Some(cookies),
            ..self.clone()
        }
    }

    /// Returns a copy with the CSRF token replaced.
    #[must_use]
    pub fn with_csrf(&self, csrf: impl Into<String>) -> Self {
        Self {
            csrf: Some(csrf.into()),
            ..self.clone()
        }
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field(
                "session_cookies",
                &self
                    .session_cookies
                    .as_ref()
                    .map(|c| c.iter().map(|(name, _)| name).collect::<Vec<_>>()),
            )
            .field("csrf", &self.csrf.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn full_context() -> AuthContext {
        AuthContext::new("admin@localhost", "secret")
            .with_token("Bearer abc")
            .with_session_cookies(CookieJar::from_iter([("_session_id", "s1")]))
            .with_csrf("csrf-1")
    }

    #[test]
    fn test_with_token_changes_only_token() {
        let original = full_context();
        let derived = original.with_token("Bearer xyz");

        assert_eq!(derived.token(), Some("Bearer xyz"));
        assert_eq!(original.token(), Some("Bearer abc"));
        assert_eq!(derived.username(), original.username());
        assert_eq!(derived.password(), original.password());
        assert_eq!(derived.session_cookies(), original.session_cookies());
        assert_eq!(derived.csrf(), original.csrf());
    }

    #[test]
    fn test_with_session_cookies_replaces_wholesale() {
        let original = full_context();
        let replacement = CookieJar::from_iter([("_mastodon_session", "m2")]);
        let derived = original.with_session_cookies(replacement.clone());

        assert_eq!(derived.session_cookies(), Some(&replacement));
        assert!(!derived.session_cookies().unwrap().contains("_session_id"));
        assert!(original.session_cookies().unwrap().contains("_session_id"));
        assert_eq!(derived.token(), original.token());
        assert_eq!(derived.csrf(), original.csrf());
    }

    #[test]
    fn test_with_csrf_changes_only_csrf() {
        let original = full_context();
        let derived = original.with_csrf("csrf-2");

        assert_eq!(derived.csrf(), Some("csrf-2"));
        assert_eq!(original.csrf(), Some("csrf-1"));
        assert_eq!(derived.with_csrf("csrf-1"), original);
    }

    #[test]
    fn test_bearer_token_strips_prefix() {
        let ctx = AuthContext::new("a", "b").with_token(bearer_header("raw"));
        assert_eq!(ctx.token(), Some("Bearer raw"));
        assert_eq!(ctx.bearer_token(), Some("raw"));
    }

    #[test]
    fn test_has_session() {
        let ctx = AuthContext::new("a", "b");
        assert!(!ctx.has_session());
        assert!(!ctx.with_session_cookies(CookieJar::new()).has_session());
        assert!(ctx
            .with_session_cookies(CookieJar::from_iter([("k", "v")]))
            .has_session());
    }

    #[test]
    fn test_cookie_merge_newer_wins() {
        let old = CookieJar::from_iter([("_session_id", "old"), ("_mastodon_session", "m1")]);
        let newer = CookieJar::from_iter([("_mastodon_session", "m2"), ("remember", "r")]);

        let merged = old.merge(&newer);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get("_session_id"), Some("old"));
        assert_eq!(merged.get("_mastodon_session"), Some("m2"));
        assert_eq!(merged.get("remember"), Some("r"));
        assert_eq!(old.get("_mastodon_session"), Some("m1"));
    }

    #[test]
    fn test_cookie_header_value() {
        let jar = CookieJar::from_iter([("b", "2"), ("a", "1")]);
        assert_eq!(jar.header_value(), "a=1; b=2");
        assert_eq!(CookieJar::new().header_value(), "");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", full_context());
        assert!(rendered.contains("admin@localhost"));
        assert!(rendered.contains("_session_id"));
        assert!(!rendered.contains("secret"));
        assert!(!rendered.contains("abc"));
        assert!(!rendered.contains("csrf-1"));
        assert!(!rendered.contains("s1"));
    }
}
