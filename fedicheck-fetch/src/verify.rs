//! Status-code gate applied before any response body is parsed.

use std::fmt;

use tracing::warn;

use crate::error::FetchError;
use crate::transport::HttpResponse;

/// The set of statuses a call accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedStatus(Vec<u16>);

impl ExpectedStatus {
    /// Every 2xx status.
    pub fn success() -> Self {
        Self((200..300).collect())
    }

    fn is_success_range(&self) -> bool {
        self.0.iter().copied().eq(200..300)
    }

    /// Returns true if `status` is accepted.
    pub fn contains(&self, status: u16) -> bool {
        self.0.contains(&status)
    }

    /// Accepted statuses.
    pub fn codes(&self) -> &[u16] {
        &self.0
    }
}

impl From<u16> for ExpectedStatus {
    fn from(status: u16) -> Self {
        Self(vec![status])
    }
}

impl From<&[u16]> for ExpectedStatus {
    fn from(statuses: &[u16]) -> Self {
        Self(statuses.to_vec())
    }
}

impl<const N: usize> From<[u16; N]> for ExpectedStatus {
    fn from(statuses: [u16; N]) -> Self {
        Self(statuses.to_vec())
    }
}

impl From<Vec<u16>> for ExpectedStatus {
    fn from(statuses: Vec<u16>) -> Self {
        Self(statuses)
    }
}

impl fmt::Display for ExpectedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success_range() {
            return f.write_str("2xx");
        }
        match self.0.as_slice() {
            [single] => write!(f, "{single}"),
            codes => {
                let list: Vec<String> = codes.iter().map(u16::to_string).collect();
                write!(f, "one of [{}]", list.join(", "))
            }
        }
    }
}

/// Fails with [`FetchError::UnexpectedStatus`] unless the response status is
/// in `expected`.
pub fn verify_status(
    expected: impl Into<ExpectedStatus>,
    response: &HttpResponse,
) -> Result<(), FetchError> {
    let expected = expected.into();
    if expected.contains(response.status) {
        return Ok(());
    }

    warn!(
        status = response.status,
        expected = %expected,
        "Unexpected response status"
    );
    Err(FetchError::UnexpectedStatus {
        expected,
        status: response.status,
        body: response.body.clone(),
    })
}
