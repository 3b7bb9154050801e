//! Status entities and everything a status embeds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::{Account, Emoji};
use super::{closed_enum, parse_optional, Validate};
use crate::CoreError;

// ============================================================================
// Closed Sets
// ============================================================================

closed_enum! {
    /// Who can see a status.
    pub enum Visibility as "visibility" {
        /// Visible to everyone, shown in public timelines.
        Public => "public",
        /// Visible to everyone, hidden from public timelines.
        Unlisted => "unlisted",
        /// Followers only.
        Private => "private",
        /// Mentioned users only.
        Direct => "direct",
    }
}

closed_enum! {
    /// Kind of media attachment.
    pub enum AttachmentType as "attachment type" {
        /// Unsupported or unrecognized file.
        Unknown => "unknown",
        /// Static image.
        Image => "image",
        /// Looping, soundless animation.
        Gifv => "gifv",
        /// Video clip.
        Video => "video",
        /// Audio track.
        Audio => "audio",
    }
}

// ============================================================================
// Status
// ============================================================================

/// A posted status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    /// Status id.
    pub id: String,
    /// ActivityPub URI.
    #[serde(default)]
    pub uri: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Author.
    pub account: Account,
    /// Body (HTML).
    #[serde(default)]
    pub content: String,
    /// Plain-text source, only present right after posting or editing.
    #[serde(default)]
    pub text: Option<String>,
    /// Visibility as sent by the server. See [`Status::visibility`].
    #[serde(default)]
    pub visibility: Option<String>,
    /// Whether the content is marked sensitive.
    #[serde(default)]
    pub sensitive: Option<bool>,
    /// Content warning.
    #[serde(default)]
    pub spoiler_text: Option<String>,
    /// Attached media.
    #[serde(default)]
    pub media_attachments: Vec<Attachment>,
    /// Posting application.
    #[serde(default)]
    pub application: Option<Application>,
    /// Mentioned accounts.
    #[serde(default)]
    pub mentions: Vec<Mention>,
    /// Hashtags used.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Custom emoji used.
    #[serde(default)]
    pub emojis: Vec<Emoji>,
    /// Boost count.
    #[serde(default)]
    pub reblogs_count: Option<u64>,
    /// Favourite count.
    #[serde(default)]
    pub favourites_count: Option<u64>,
    /// Reply count.
    #[serde(default)]
    pub replies_count: Option<u64>,
    /// HTML page URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Parent status id.
    #[serde(default)]
    pub in_reply_to_id: Option<String>,
    /// Parent status author id.
    #[serde(default)]
    pub in_reply_to_account_id: Option<String>,
    /// Boosted status.
    #[serde(default)]
    pub reblog: Option<Box<Status>>,
    /// Attached poll.
    #[serde(default)]
    pub poll: Option<Poll>,
    /// Link preview.
    #[serde(default)]
    pub card: Option<Card>,
    /// ISO 639 language code.
    #[serde(default)]
    pub language: Option<String>,
    /// Viewer has favourited.
    #[serde(default)]
    pub favourited: Option<bool>,
    /// Viewer has boosted.
    #[serde(default)]
    pub reblogged: Option<bool>,
    /// Viewer has muted the conversation.
    #[serde(default)]
    pub muted: Option<bool>,
    /// Viewer has bookmarked.
    #[serde(default)]
    pub bookmarked: Option<bool>,
    /// Pinned on the author's profile.
    #[serde(default)]
    pub pinned: Option<bool>,
}

impl Status {
    /// Parses the visibility field.
    pub fn visibility(&self) -> Result<Option<Visibility>, CoreError> {
        parse_optional(self.visibility.as_deref())
    }

    /// Returns true if the status uses the hashtag (case-insensitive, without `#`).
    pub fn has_tag(&self, name: &str) -> bool {
        let name = name.trim_start_matches('#');
        self.tags.iter().any(|t| t.name.eq_ignore_ascii_case(name))
    }
}

impl Validate for Status {
    fn validate(&self) -> Result<(), CoreError> {
        self.visibility()?;
        self.account.validate()?;
        self.media_attachments.validate()?;
        if let Some(reblog) = &self.reblog {
            reblog.validate()?;
        }
        Ok(())
    }
}

// ============================================================================
// Embedded Entities
// ============================================================================

/// A media attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment id.
    pub id: String,
    /// Media kind as sent by the server. See [`Attachment::attachment_type`].
    #[serde(rename = "type")]
    pub kind: String,
    /// Full-size URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Preview URL.
    #[serde(default)]
    pub preview_url: Option<String>,
    /// Origin URL for remote media.
    #[serde(default)]
    pub remote_url: Option<String>,
    /// Short URL.
    #[serde(default)]
    pub text_url: Option<String>,
    /// Dimensions and duration, shape depends on `kind`.
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    /// Alt text.
    #[serde(default)]
    pub description: Option<String>,
    /// Blurhash placeholder.
    #[serde(default)]
    pub blurhash: Option<String>,
}

impl Attachment {
    /// Parses the media kind.
    pub fn attachment_type(&self) -> Result<AttachmentType, CoreError> {
        self.kind.parse()
    }
}

impl Validate for Attachment {
    fn validate(&self) -> Result<(), CoreError> {
        self.attachment_type().map(|_| ())
    }
}

/// The application a status was posted from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Application name.
    pub name: String,
    /// Homepage.
    #[serde(default)]
    pub website: Option<String>,
    /// Web push key.
    #[serde(default)]
    pub vapid_key: Option<String>,
    /// OAuth client id (only when registering).
    #[serde(default)]
    pub client_id: Option<String>,
    /// OAuth client secret (only when registering).
    #[serde(default)]
    pub client_secret: Option<String>,
}

/// A mentioned account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// Account id.
    pub id: String,
    /// Local username.
    pub username: String,
    /// Webfinger account.
    pub acct: String,
    /// Profile URL.
    pub url: String,
}

/// A hashtag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name without `#`.
    pub name: String,
    /// Tag page URL.
    pub url: String,
    /// Recent usage.
    #[serde(default)]
    pub history: Vec<TagHistory>,
}

/// Daily usage of a hashtag. Counts are strings on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagHistory {
    /// Day as a UNIX timestamp string.
    pub day: String,
    /// Uses on that day.
    pub uses: String,
    /// Distinct accounts on that day.
    pub accounts: String,
}

/// A poll attached to a status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    /// Poll id.
    pub id: String,
    /// Closing time.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether voting has closed.
    #[serde(default)]
    pub expired: bool,
    /// Whether several options may be chosen.
    #[serde(default)]
    pub multiple: bool,
    /// Total votes.
    #[serde(default)]
    pub votes_count: u64,
    /// Distinct voters (multiple-choice polls only).
    #[serde(default)]
    pub voters_count: Option<u64>,
    /// Viewer has voted.
    #[serde(default)]
    pub voted: Option<bool>,
    /// Option indexes the viewer chose.
    #[serde(default)]
    pub own_votes: Vec<u32>,
    /// Choices.
    #[serde(default)]
    pub options: Vec<PollOption>,
    /// Custom emoji used in options.
    #[serde(default)]
    pub emojis: Vec<Emoji>,
}

/// One poll choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    /// Choice text.
    pub title: String,
    /// Votes, hidden until the poll ends for some polls.
    #[serde(default)]
    pub votes_count: Option<u64>,
}

/// A link preview card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Linked URL.
    pub url: String,
    /// Page title.
    pub title: String,
    /// Page description.
    #[serde(default)]
    pub description: String,
    /// Preview kind (`link`, `photo`, `video`, `rich`).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Author name.
    #[serde(default)]
    pub author_name: Option<String>,
    /// Author URL.
    #[serde(default)]
    pub author_url: Option<String>,
    /// Provider name.
    #[serde(default)]
    pub provider_name: Option<String>,
    /// Provider URL.
    #[serde(default)]
    pub provider_url: Option<String>,
    /// Embed HTML.
    #[serde(default)]
    pub html: Option<String>,
    /// Embed width.
    #[serde(default)]
    pub width: Option<u32>,
    /// Embed height.
    #[serde(default)]
    pub height: Option<u32>,
    /// Preview image.
    #[serde(default)]
    pub image: Option<String>,
    /// Embed URL.
    #[serde(default)]
    pub embed_url: Option<String>,
}
