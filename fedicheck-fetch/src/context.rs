//! Service context shared by every service call.
//!
//! A context bundles the transport with the base URL of the target
//! instance. It is cheap to clone and holds no per-user state.

use std::sync::Arc;
use std::time::Duration;

use crate::error::FetchError;
use crate::transport::{HttpTransport, ReqwestTransport, DEFAULT_TIMEOUT_SECS};

/// Default base URL of a local development instance.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

// ============================================================================
// Service Context
// ============================================================================

/// Transport plus target instance.
#[derive(Clone)]
pub struct ServiceContext {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
}

impl ServiceContext {
    /// Creates a context from an existing transport.
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
        }
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// The transport.
    pub fn transport(&self) -> &dyn HttpTransport {
        self.transport.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Service Context Builder
// ============================================================================

/// Builder for constructing a [`ServiceContext`].
pub struct ServiceContextBuilder {
    transport: Option<Arc<dyn HttpTransport>>,
    base_url: String,
    timeout: Duration,
}

impl ServiceContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            transport: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the transport. Overrides `timeout`.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the timeout of the default transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the context, creating a [`ReqwestTransport`] if none was set.
    pub fn build(self) -> Result<ServiceContext, FetchError> {
        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::with_timeout(self.timeout)?),
        };
        Ok(ServiceContext::new(transport, self.base_url))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
