//! Account-related entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{parse_optional, Validate, Visibility};
use crate::CoreError;

// ============================================================================
// Account
// ============================================================================

/// A user account as returned by `/api/v1/accounts/*`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Server-side account id (a numeric string).
    pub id: String,
    /// Local username.
    pub username: String,
    /// Webfinger account (`user` or `user@domain`).
    pub acct: String,
    /// Profile page URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Profile bio (HTML).
    #[serde(default)]
    pub note: Option<String>,
    /// Avatar URL.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Static avatar URL.
    #[serde(default)]
    pub avatar_static: Option<String>,
    /// Header image URL.
    #[serde(default)]
    pub header: Option<String>,
    /// Static header image URL.
    #[serde(default)]
    pub header_static: Option<String>,
    /// Whether follows require approval.
    #[serde(default)]
    pub locked: Option<bool>,
    /// Custom emoji used in the profile.
    #[serde(default)]
    pub emojis: Vec<Emoji>,
    /// Whether the account opts into discovery.
    #[serde(default)]
    pub discoverable: Option<bool>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Number of statuses posted.
    #[serde(default)]
    pub statuses_count: Option<u64>,
    /// Number of followers.
    #[serde(default)]
    pub followers_count: Option<u64>,
    /// Number of accounts followed.
    #[serde(default)]
    pub following_count: Option<u64>,
    /// Account this one moved to.
    #[serde(default)]
    pub moved: Option<Box<Account>>,
    /// Profile metadata fields.
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Whether the account is automated.
    #[serde(default)]
    pub bot: Option<bool>,
    /// Source values, only present on `verify_credentials`/`update_credentials`.
    #[serde(default)]
    pub source: Option<Source>,
}

impl Account {
    /// Returns the first profile field with the given name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl Validate for Account {
    fn validate(&self) -> Result<(), CoreError> {
        if let Some(source) = &self.source {
            source.privacy()?;
        }
        if let Some(moved) = &self.moved {
            moved.validate()?;
        }
        Ok(())
    }
}

/// A profile metadata field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field label.
    pub name: String,
    /// Field value (HTML).
    pub value: String,
    /// When the link in `value` was verified.
    #[serde(default)]
    pub verified_at: Option<DateTime<Utc>>,
}

/// Plain-text profile values shown only to the owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Unformatted bio.
    #[serde(default)]
    pub note: Option<String>,
    /// Unformatted profile fields.
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Default post visibility as sent. See [`Source::privacy`].
    #[serde(default)]
    pub privacy: Option<String>,
    /// Whether posts are marked sensitive by default.
    #[serde(default)]
    pub sensitive: Option<bool>,
    /// Default post language.
    #[serde(default)]
    pub language: Option<String>,
    /// Pending follow requests.
    #[serde(default)]
    pub follow_requests_count: Option<u64>,
}

impl Source {
    /// Parses the default post visibility.
    pub fn privacy(&self) -> Result<Option<Visibility>, CoreError> {
        parse_optional(self.privacy.as_deref())
    }
}

/// A custom emoji.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoji {
    /// Name used between colons.
    pub shortcode: String,
    /// Image URL.
    pub url: String,
    /// Static image URL.
    #[serde(default)]
    pub static_url: Option<String>,
    /// Whether the emoji is listed in the picker.
    #[serde(default)]
    pub visible_in_picker: Option<bool>,
    /// Picker category.
    #[serde(default)]
    pub category: Option<String>,
}
