// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Fedicheck Core
//!
//! Core types shared by every fedicheck crate.
//!
//! - [`AuthContext`] - identity and credential bundle used to authorize requests
//! - [`CookieJar`] - session cookie map with merge-forward semantics
//! - Entity models mirroring the server's REST payloads
//! - [`CoreError`] - closed-set failures, checked through [`Validate`]
//!
//! ## Key Types
//!
//! ### Credentials
//! - [`AuthContext`] - immutable; refreshed credentials produce a new value
//! - [`CookieJar`] - cookie name to value, rendered as a `Cookie` header
//!
//! ### Entities
//! - [`Account`], [`Field`], [`Source`], [`Emoji`]
//! - [`Status`], [`Visibility`], [`Attachment`], [`Poll`], [`Card`]
//! - [`Tag`], [`Mention`], [`Application`], [`Notification`]
//! - [`Token`], [`Relationship`], [`Filter`], [`ApiError`]

pub mod auth;
pub mod error;
pub mod models;

pub use auth::{bearer_header, AuthContext, CookieJar, BEARER_PREFIX};
pub use error::CoreError;

pub use models::{
    // Accounts
    Account,
    Emoji,
    Field,
    Source,
    // Statuses
    Application,
    Attachment,
    AttachmentType,
    Card,
    Mention,
    Poll,
    PollOption,
    Status,
    Tag,
    TagHistory,
    Visibility,
    // Misc
    ApiError,
    Filter,
    FilterContext,
    Notification,
    NotificationType,
    Relationship,
    Token,
    // Decoding
    Validate,
};
