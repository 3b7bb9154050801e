//! Credential scraping from server-rendered pages.
//!
//! Web pages carry two credentials the API flow needs: the CSRF token in a
//! `<meta name="csrf-token">` tag, and the web client's own access token
//! inside the JSON blob of `<script id="initial-state">`. The two lookups are
//! independent; a page may have one without the other.

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use crate::error::ExtractionError;

const CSRF_SELECTOR: &str = r#"meta[name="csrf-token"]"#;
const INITIAL_STATE_SELECTOR: &str = "script#initial-state";

fn selector(css: &'static str) -> Result<Selector, ExtractionError> {
    Selector::parse(css).map_err(|e| ExtractionError::Selector {
        selector: css,
        reason: e.to_string(),
    })
}

/// Returns the `content` of the first `<meta name="csrf-token">`.
pub fn extract_csrf(html: &str) -> Result<String, ExtractionError> {
    let document = Html::parse_document(html);
    let selector = selector(CSRF_SELECTOR)?;

    let token = document
        .select(&selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .ok_or(ExtractionError::CsrfTokenNotFound)?;

    debug!("CSRF token found");
    Ok(token.to_string())
}

/// Returns the raw access token from the page's initial state.
///
/// The value has no `Bearer ` prefix.
pub fn extract_bearer_token(html: &str) -> Result<String, ExtractionError> {
    let document = Html::parse_document(html);
    let selector = selector(INITIAL_STATE_SELECTOR)?;

    let script = document
        .select(&selector)
        .next()
        .ok_or(ExtractionError::InitialStateNotFound)?;
    let text: String = script.text().collect();

    let state: Value = serde_json::from_str(text.trim())
        .map_err(|e| ExtractionError::InvalidInitialState(e.to_string()))?;

    let token = state
        .pointer("/meta/access_token")
        .and_then(Value::as_str)
        .ok_or(ExtractionError::AccessTokenNotFound)?;

    debug!("Access token found in initial state");
    Ok(token.to_string())
}
