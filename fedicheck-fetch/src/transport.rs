//! HTTP transport trait and the reqwest-backed implementation.
//!
//! The reqwest transport never follows redirects: the sign-in POST answers
//! with a 302 whose `Set-Cookie` carries the new session, and the caller
//! must see both.

use std::time::Duration;

use async_trait::async_trait;
use fedicheck_core::CookieJar;
use reqwest::{header, redirect, Client};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::{FetchError, HttpError};
use crate::request::{Headers, HttpRequest};

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for fedicheck.
const USER_AGENT: &str = concat!("fedicheck/", env!("CARGO_PKG_VERSION"));

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

// ============================================================================
// HTTP Response
// ============================================================================

/// A received response with its body fully read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Response headers.
    pub headers: Headers,
    /// Cookies set by the response, by name.
    pub cookies: CookieJar,
    /// Body text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response with a status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            ..Self::default()
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Adds a cookie.
    #[must_use]
    pub fn with_cookie(mut self, name: &str, value: &str) -> Self {
        self.cookies.insert(name, value);
        self
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Executes requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends `request` and reads the whole response.
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError>;
}

// ============================================================================
// Reqwest Transport
// ============================================================================

/// Transport over a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the default timeout.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a transport with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| HttpError::ClientBuild(e.to_string()))?;

        Ok(Self { inner: client })
    }

    /// Returns the inner reqwest client.
    pub fn inner(&self) -> &Client {
        &self.inner
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        let url = request.full_url()?;
        let mut builder = self.inner.request(request.method.into(), url);

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(form) = &request.form {
            builder = builder
                .header(header::CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(form.encode());
        }

        debug!(
            has_cookies = request.headers.contains("cookie"),
            has_token = request.headers.contains("authorization"),
            "Dispatching request"
        );
        let response = builder.send().await?;
        let status = response.status().as_u16();

        let cookies: CookieJar = response
            .cookies()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect();

        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str(), value);
            }
        }

        let body = response.text().await?;
        debug!(status, cookies = cookies.len(), "Response received");

        Ok(HttpResponse {
            status,
            headers,
            cookies,
            body,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
