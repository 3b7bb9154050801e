//! Fetch error types.

use thiserror::Error;

use crate::verify::ExpectedStatus;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for request, sign-in and service operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// A credential could not be scraped from a server-rendered page.
    #[error("Credential extraction failed: {0}")]
    CredentialExtraction(#[from] ExtractionError),

    /// The sign-in form was rejected.
    #[error("Authentication failed with status {status}")]
    AuthenticationFailed {
        /// Status returned by the sign-in POST.
        status: u16,
        /// Response body.
        body: String,
    },

    /// A verified call returned a status outside the expected set.
    #[error("Unexpected status {status}, expected {expected}")]
    UnexpectedStatus {
        /// Accepted statuses.
        expected: ExpectedStatus,
        /// Actual status.
        status: u16,
        /// Response body.
        body: String,
    },

    /// A builder was finished without a required field.
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// Core error.
    #[error("Core error: {0}")]
    Core(#[from] fedicheck_core::CoreError),

    /// Transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(HttpError::from(err))
    }
}

impl FetchError {
    /// Returns the HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationFailed { status, .. } | Self::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

// ============================================================================
// HTTP Error
// ============================================================================

/// Transport-level error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    /// Transport had nothing to answer with.
    #[error("Transport error: {0}")]
    Transport(String),
}

// ============================================================================
// Extraction Error
// ============================================================================

/// Error type for credential scraping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// No `<meta name="csrf-token">` with a `content` attribute.
    #[error("CSRF token not found in page")]
    CsrfTokenNotFound,

    /// No `<script id="initial-state">` element.
    #[error("Initial state script not found in page")]
    InitialStateNotFound,

    /// The initial state script is not valid JSON.
    #[error("Initial state is not valid JSON: {0}")]
    InvalidInitialState(String),

    /// The initial state has no string at `meta.access_token`.
    #[error("Access token not found in initial state")]
    AccessTokenNotFound,

    /// A CSS selector failed to parse.
    #[error("Invalid selector {selector}: {reason}")]
    Selector {
        /// Selector source.
        selector: &'static str,
        /// Parser message.
        reason: String,
    },
}
