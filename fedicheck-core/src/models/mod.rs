//! Entity models for the server's REST payloads.
//!
//! Every type here is a passive value object deserialized from JSON. Fields
//! the server may omit are `Option` or default to empty collections.
//!
//! ## Submodules
//!
//! - [`account`] - Account, Field, Source, Emoji
//! - [`status`] - Status and everything a status embeds
//! - [`misc`] - Token, Relationship, Filter, Notification, `ApiError`

use std::str::FromStr;

use crate::CoreError;

/// Declares a closed string enum.
///
/// Parsing is case-insensitive and rejects anything outside the set with
/// [`CoreError::InvalidEnumValue`]. Entities keep these fields as the raw
/// wire string and parse them through typed accessors, so an unknown value
/// surfaces as a [`CoreError`] rather than a JSON decoding failure.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every accepted value.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $( $text => Ok(Self::$variant), )+
                    _ => Err($crate::CoreError::InvalidEnumValue {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.as_str()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use closed_enum;

/// Checks the closed-set fields of a decoded entity.
///
/// Services run this after every JSON decode.
pub trait Validate {
    /// Returns the first closed-set field holding an unknown value.
    fn validate(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), CoreError> {
        self.iter().try_for_each(Validate::validate)
    }
}

fn parse_optional<T: FromStr<Err = CoreError>>(raw: Option<&str>) -> Result<Option<T>, CoreError> {
    raw.map(str::parse).transpose()
}

mod account;
mod misc;
mod status;

pub use account::{Account, Emoji, Field, Source};
pub use misc::{ApiError, Filter, FilterContext, Notification, NotificationType, Relationship, Token};
pub use status::{
    Application, Attachment, AttachmentType, Card, Mention, Poll, PollOption, Status, Tag,
    TagHistory, Visibility,
};
