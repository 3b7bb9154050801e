//! Request builder that carries a user's credentials.

use fedicheck_core::{AuthContext, CookieJar};

use crate::request::{FormBody, HttpRequest, Method, QueryParams, QueryValue, RequestBuilder};

/// Header carrying the Bearer token.
pub const AUTHORIZATION: &str = "authorization";

/// A [`RequestBuilder`] preloaded from an [`AuthContext`].
///
/// Session cookies become the `Cookie` header and the token is copied into
/// `Authorization` verbatim. A context with neither yields an anonymous
/// request.
#[derive(Debug, Clone)]
pub struct AuthedRequestBuilder {
    inner: RequestBuilder,
}

impl AuthedRequestBuilder {
    /// Starts a request acting as `auth`.
    pub fn new(url: impl Into<String>, method: Method, auth: &AuthContext) -> Self {
        let mut inner = RequestBuilder::new(url, method);
        if let Some(cookies) = auth.session_cookies() {
            inner = inner.with_session_cookies(cookies.clone());
        }
        if let Some(token) = auth.token() {
            inner = inner.with_header(AUTHORIZATION, token);
        }
        Self { inner }
    }

    /// Drops the `Authorization` header so only the web session is sent.
    ///
    /// Web-form endpoints reject requests that carry both.
    #[must_use]
    pub fn only_cookies(mut self) -> Self {
        self.inner = self.inner.without_header(AUTHORIZATION);
        self
    }

    /// See [`RequestBuilder::with_form_body`].
    #[must_use]
    pub fn with_form_body(mut self, form: FormBody) -> Self {
        self.inner = self.inner.with_form_body(form);
        self
    }

    /// See [`RequestBuilder::with_form_field`].
    #[must_use]
    pub fn with_form_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inner = self.inner.with_form_field(key, value);
        self
    }

    /// See [`RequestBuilder::with_query_param`].
    #[must_use]
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.inner = self.inner.with_query_param(key, value);
        self
    }

    /// See [`RequestBuilder::with_query_params`].
    #[must_use]
    pub fn with_query_params(mut self, params: &QueryParams) -> Self {
        self.inner = self.inner.with_query_params(params);
        self
    }

    /// Adds `params` when present.
    #[must_use]
    pub fn with_optional_query(self, params: Option<&QueryParams>) -> Self {
        match params {
            Some(params) => self.with_query_params(params),
            None => self,
        }
    }

    /// See [`RequestBuilder::with_header`].
    #[must_use]
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.inner = self.inner.with_header(name, value);
        self
    }

    /// See [`RequestBuilder::with_session_cookies`].
    #[must_use]
    pub fn with_session_cookies(mut self, cookies: CookieJar) -> Self {
        self.inner = self.inner.with_session_cookies(cookies);
        self
    }

    /// Finishes the request.
    pub fn build(self) -> HttpRequest {
        self.inner.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://localhost:3000/api/v1/accounts/verify_credentials";

    fn cookies() -> CookieJar {
        [("_session_id", "abc")].into_iter().collect()
    }

    #[test]
    fn test_cookies_only_context() {
        let auth = AuthContext::new("alice@localhost", "pw").with_session_cookies(cookies());
        let request = AuthedRequestBuilder::new(URL, Method::Get, &auth).build();

        assert_eq!(request.header("cookie"), Some("_session_id=abc"));
        assert!(request.header("authorization").is_none());
    }

    #[test]
    fn test_token_only_context() {
        let auth = AuthContext::new("alice@localhost", "pw").with_token("Bearer tok");
        let request = AuthedRequestBuilder::new(URL, Method::Get, &auth).build();

        assert_eq!(request.header("Authorization"), Some("Bearer tok"));
        assert!(request.header("cookie").is_none());
    }

    #[test]
    fn test_only_cookies_strips_token() {
        let auth = AuthContext::new("admin@localhost", "pw")
            .with_token("Bearer tok")
            .with_session_cookies(cookies());
        let request = AuthedRequestBuilder::new(URL, Method::Post, &auth)
            .only_cookies()
            .with_form_field("_method", "post")
            .build();

        assert!(request.header("authorization").is_none());
        assert_eq!(request.header("cookie"), Some("_session_id=abc"));
        assert_eq!(request.form.unwrap().get("_method"), Some("post"));
    }

    #[test]
    fn test_anonymous_context() {
        let auth = AuthContext::new("nobody", "pw");
        let request = AuthedRequestBuilder::new(URL, Method::Get, &auth).build();

        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_optional_query() {
        let auth = AuthContext::new("nobody", "pw");
        let mut params = QueryParams::new();
        params.insert("limit", "2");

        let with = AuthedRequestBuilder::new(URL, Method::Get, &auth)
            .with_optional_query(Some(&params))
            .build();
        let without = AuthedRequestBuilder::new(URL, Method::Get, &auth)
            .with_optional_query(None)
            .build();

        assert_eq!(with.query.len(), 1);
        assert!(without.query.is_empty());
    }
}
