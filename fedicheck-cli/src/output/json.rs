//! JSON output formatting.

use anyhow::Result;
use fedicheck_core::AuthContext;
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// Result of a sign-in. The password is never included.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthOutput {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub cookies: Vec<String>,
    pub has_csrf: bool,
}

impl From<&AuthContext> for AuthOutput {
    fn from(auth: &AuthContext) -> Self {
        Self {
            username: auth.username().to_string(),
            token: auth.token().map(str::to_string),
            cookies: auth
                .session_cookies()
                .map(|jar| jar.iter().map(|(name, _)| name.to_string()).collect())
                .unwrap_or_default(),
            has_csrf: auth.csrf().is_some(),
        }
    }
}

/// One step of the smoke run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOutput {
    pub name: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Smoke run report.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmokeOutput {
    pub base_url: String,
    pub steps: Vec<StepOutput>,
}

impl SmokeOutput {
    /// Whether every step passed.
    pub fn passed(&self) -> bool {
        self.steps.iter().all(|s| s.ok)
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a sign-in result.
    pub fn format_auth(&self, auth: &AuthContext) -> Result<String> {
        self.format(&AuthOutput::from(auth))
    }
}
