//! Tokens, relationships, filters, notifications and error bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::Account;
use super::status::Status;
use super::{closed_enum, Validate};
use crate::CoreError;

closed_enum! {
    /// Where a keyword filter applies.
    pub enum FilterContext as "filter context" {
        /// Home timeline and lists.
        Home => "home",
        /// Notifications.
        Notifications => "notifications",
        /// Public timelines.
        Public => "public",
        /// Expanded threads.
        Thread => "thread",
        /// Profile pages.
        Account => "account",
    }
}

closed_enum! {
    /// Kind of notification.
    pub enum NotificationType as "notification type" {
        /// Someone mentioned the viewer.
        Mention => "mention",
        /// Someone the viewer follows posted.
        Status => "status",
        /// Someone boosted the viewer's status.
        Reblog => "reblog",
        /// Someone followed the viewer.
        Follow => "follow",
        /// Someone requested to follow the viewer.
        FollowRequest => "follow_request",
        /// Someone favourited the viewer's status.
        Favourite => "favourite",
        /// A poll the viewer voted in or created has ended.
        Poll => "poll",
        /// A boosted status was edited.
        Update => "update",
        /// A new user signed up (admins only).
        AdminSignUp => "admin.sign_up",
        /// A new report was filed (admins only).
        AdminReport => "admin.report",
    }
}

/// OAuth token returned when registering an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Raw access token (no `Bearer ` prefix).
    pub access_token: String,
    /// Always `Bearer`.
    #[serde(default)]
    pub token_type: Option<String>,
    /// Granted scopes, space separated.
    #[serde(default)]
    pub scope: Option<String>,
    /// Issue time as a UNIX timestamp.
    #[serde(default)]
    pub created_at: Option<i64>,
}

/// The viewer's relationship to another account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Relationship {
    /// Other account id.
    pub id: String,
    /// Viewer follows them.
    pub following: bool,
    /// Viewer has a pending follow request.
    pub requested: bool,
    /// Viewer features them on their profile.
    pub endorsed: bool,
    /// They follow the viewer.
    pub followed_by: bool,
    /// Viewer mutes them.
    pub muting: bool,
    /// Viewer mutes their notifications.
    pub muting_notifications: bool,
    /// Viewer sees their boosts.
    pub showing_reblogs: bool,
    /// Viewer blocks them.
    pub blocking: bool,
    /// Viewer blocks their domain.
    pub domain_blocking: bool,
    /// They block the viewer.
    pub blocked_by: bool,
}

/// A v1 keyword filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Filter id.
    pub id: String,
    /// Keyword or phrase.
    pub phrase: String,
    /// Where the filter applies, as sent. See [`Filter::contexts`].
    #[serde(default)]
    pub context: Vec<String>,
    /// Expiry time.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether matches are dropped server-side.
    #[serde(default)]
    pub irreversible: bool,
    /// Whether the phrase must match a whole word.
    #[serde(default)]
    pub whole_word: bool,
}

/// A notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Notification id.
    pub id: String,
    /// Kind as sent by the server. See [`Notification::notification_type`].
    #[serde(rename = "type")]
    pub kind: String,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Account that caused the notification.
    pub account: Account,
    /// Related status, for status-based kinds.
    #[serde(default)]
    pub status: Option<Box<Status>>,
}

impl Filter {
    /// Parses the contexts the filter applies to.
    pub fn contexts(&self) -> Result<Vec<FilterContext>, CoreError> {
        self.context.iter().map(|c| c.parse()).collect()
    }
}

impl Notification {
    /// Parses the notification kind.
    pub fn notification_type(&self) -> Result<NotificationType, CoreError> {
        self.kind.parse()
    }
}

impl Validate for Token {}

impl Validate for Relationship {}

impl Validate for Filter {
    fn validate(&self) -> Result<(), CoreError> {
        self.contexts().map(|_| ())
    }
}

impl Validate for Notification {
    fn validate(&self) -> Result<(), CoreError> {
        self.notification_type()?;
        self.account.validate()?;
        if let Some(status) = &self.status {
            status.validate()?;
        }
        Ok(())
    }
}

/// Error body returned by the API on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Longer OAuth error description.
    #[serde(default)]
    pub error_description: Option<String>,
}
