//! Transport-neutral request values and the fluent request builder.
//!
//! An [`HttpRequest`] is plain data: it can be inspected in tests or handed
//! to any [`HttpTransport`](crate::HttpTransport). Header names are stored
//! lowercased so lookups are case-insensitive.

use std::collections::BTreeMap;
use std::fmt;

use fedicheck_core::CookieJar;
use url::Url;

use crate::error::HttpError;

// ============================================================================
// Method
// ============================================================================

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl Method {
    /// Returns the method token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// Headers
// ============================================================================

/// Header map with case-insensitive names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(BTreeMap<String, String>);

impl Headers {
    /// Creates an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header, replacing any previous value.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.0.insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Removes a header.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(&name.to_ascii_lowercase())
    }

    /// Returns a header value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Returns true if the header is set.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(&name.to_ascii_lowercase())
    }

    /// Iterates over `(name, value)` pairs. Names are lowercase.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no headers are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ============================================================================
// Form Body
// ============================================================================

/// An `application/x-www-form-urlencoded` body.
///
/// Keys keep insertion order; setting an existing key replaces its value in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBody(Vec<(String, String)>);

impl FormBody {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Returns a field value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encodes the form as `a=1&b=2`.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormBody {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormBody::new();
        for (k, v) in iter {
            form.insert(k, v);
        }
        form
    }
}

// ============================================================================
// Query Parameters
// ============================================================================

/// A query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// Emitted once as `key=value`.
    Single(String),
    /// Emitted as one `key=value` pair per element.
    List(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Single(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Single(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        QueryValue::Single(value.clone())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Single(value.to_string())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::List(values)
    }
}

impl From<&[&str]> for QueryValue {
    fn from(values: &[&str]) -> Self {
        QueryValue::List(values.iter().map(|v| (*v).to_string()).collect())
    }
}

/// Ordered query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, QueryValue)>);

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Returns a parameter value.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flattens into wire pairs, repeating the key for list values.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        for (key, value) in &self.0 {
            match value {
                QueryValue::Single(v) => pairs.push((key.as_str(), v.as_str())),
                QueryValue::List(vs) => {
                    pairs.extend(vs.iter().map(|v| (key.as_str(), v.as_str())));
                }
            }
        }
        pairs
    }

    fn extend_from(&mut self, other: &QueryParams) {
        for (key, value) in &other.0 {
            self.insert(key.clone(), value.clone());
        }
    }
}

// ============================================================================
// HTTP Request
// ============================================================================

/// A fully described request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Method.
    pub method: Method,
    /// Absolute URL without the query string.
    pub url: String,
    /// Headers, including `cookie` when session cookies are attached.
    pub headers: Headers,
    /// Form body.
    pub form: Option<FormBody>,
    /// Query parameters.
    pub query: QueryParams,
    /// Session cookies.
    pub cookies: Option<CookieJar>,
}

impl HttpRequest {
    /// Returns a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Builds the final URL with query parameters appended.
    pub fn full_url(&self) -> Result<Url, HttpError> {
        let mut url =
            Url::parse(&self.url).map_err(|e| HttpError::InvalidUrl(format!("{}: {e}", self.url)))?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.pairs());
        }
        Ok(url)
    }
}

// ============================================================================
// Request Builder
// ============================================================================

/// Fluent builder for [`HttpRequest`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    request: HttpRequest,
}

impl RequestBuilder {
    /// Starts a request.
    pub fn new(url: impl Into<String>, method: Method) -> Self {
        Self {
            request: HttpRequest {
                method,
                url: url.into(),
                headers: Headers::new(),
                form: None,
                query: QueryParams::new(),
                cookies: None,
            },
        }
    }

    /// Replaces the form body.
    #[must_use]
    pub fn with_form_body(mut self, form: FormBody) -> Self {
        self.request.form = Some(form);
        self
    }

    /// Sets one form field, creating the body if needed.
    #[must_use]
    pub fn with_form_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request
            .form
            .get_or_insert_with(FormBody::new)
            .insert(key, value);
        self
    }

    /// Sets one query parameter.
    #[must_use]
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.request.query.insert(key, value);
        self
    }

    /// Adds every parameter from `params`.
    #[must_use]
    pub fn with_query_params(mut self, params: &QueryParams) -> Self {
        self.request.query.extend_from(params);
        self
    }

    /// Sets a header.
    #[must_use]
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.request.headers.insert(name, value);
        self
    }

    /// Removes a header.
    #[must_use]
    pub fn without_header(mut self, name: &str) -> Self {
        self.request.headers.remove(name);
        self
    }

    /// Replaces the session cookies.
    #[must_use]
    pub fn with_session_cookies(mut self, cookies: CookieJar) -> Self {
        self.request.cookies = Some(cookies);
        self
    }

    /// Finishes the request, rendering cookies into a single `cookie` header.
    ///
    /// An attached jar replaces any `cookie` header set by hand; an empty jar
    /// removes it. Without a jar the header is left as set.
    pub fn build(mut self) -> HttpRequest {
        match self.request.cookies.as_ref() {
            Some(cookies) if cookies.is_empty() => {
                self.request.headers.remove("cookie");
            }
            Some(cookies) => self.request.headers.insert("cookie", cookies.header_value()),
            None => {}
        }
        self.request
    }
}

// ============================================================================
// Tests
// ============================================================================
