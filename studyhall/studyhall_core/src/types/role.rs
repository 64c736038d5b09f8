//! Membership roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role a user holds within one channel.
///
/// Role is fixed for the lifetime of a membership record, but the same user
/// may hold different roles in different channels: `Creator` in channels
/// they created, `Member` elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// The user who created the channel.
    Creator,

    /// A tutor appointed within the channel.
    Tutor,

    /// An ordinary member.
    Member,
}

impl Role {
    /// Whether this role carries the moderation tier (message posting and
    /// deletion without ownership checks).
    pub fn is_moderator(&self) -> bool {
        matches!(self, Role::Creator | Role::Tutor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Creator => write!(f, "CREATOR"),
            Role::Tutor => write!(f, "TUTOR"),
            Role::Member => write!(f, "MEMBER"),
        }
    }
}
