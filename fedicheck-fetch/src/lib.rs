// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Fedicheck Fetch
//!
//! Request plumbing for the fedicheck test client.
//!
//! Every service call goes through the same pipeline: build a request,
//! execute it on a transport, verify the status, then parse the body.
//!
//! ## Building Requests
//!
//! - [`request::RequestBuilder`] - Fluent construction of an [`HttpRequest`]
//! - [`authed::AuthedRequestBuilder`] - Same, preloaded with a user's
//!   token and session cookies
//!
//! ## Executing
//!
//! - [`transport::HttpTransport`] - Transport trait
//! - [`transport::ReqwestTransport`] - reqwest client, redirects disabled
//! - [`context::ServiceContext`] - Transport plus target base URL
//!
//! ## Verifying and Parsing
//!
//! - [`verify::verify_status`] - Status-code gate
//! - [`html`] - CSRF and access-token scraping from web pages
//!
//! ## Example
//!
//! ```ignore
//! use fedicheck_fetch::{verify_status, AuthedRequestBuilder, Method, ServiceContext};
//!
//! let ctx = ServiceContext::builder().base_url("http://localhost:3000").build()?;
//! let request = AuthedRequestBuilder::new(
//!     ctx.url("/api/v1/accounts/verify_credentials"),
//!     Method::Get,
//!     &auth,
//! )
//! .build();
//!
//! let response = ctx.transport().execute(&request).await?;
//! verify_status(200, &response)?;
//! let account: Account = response.json()?;
//! ```

pub mod authed;
pub mod context;
pub mod error;
pub mod html;
pub mod request;
pub mod transport;
pub mod verify;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Errors
pub use error::{ExtractionError, FetchError, HttpError};

// Requests
pub use authed::AuthedRequestBuilder;
pub use request::{
    FormBody, Headers, HttpRequest, Method, QueryParams, QueryValue, RequestBuilder,
};

// Transport
pub use context::{ServiceContext, ServiceContextBuilder, DEFAULT_BASE_URL};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport, DEFAULT_TIMEOUT_SECS};

// Verification & extraction
pub use html::{extract_bearer_token, extract_csrf};
pub use verify::{verify_status, ExpectedStatus};
