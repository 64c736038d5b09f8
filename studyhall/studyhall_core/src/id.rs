//! Strongly-typed identifiers for Studyhall entities.
//!
//! Every entity in the system is addressed by a UUID, but raw UUIDs make it
//! far too easy to pass a user id where a channel id is expected. Each
//! identifier type here is a thin wrapper around a UUID with a phantom type
//! parameter, so mixing them up is a compile error.
//!
//! # Examples
//!
//! ```
//! use studyhall_core::id::{ChannelId, UserId};
//! use std::str::FromStr;
//!
//! let user_id = UserId::new();
//! let channel_id = ChannelId::from_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
//!
//! // This would not compile:
//! // let _: UserId = channel_id;
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A type-safe identifier based on UUID.
///
/// Specialized per entity type via the phantom parameter `T`, so identifiers
/// for different entities are distinct types even though they share the same
/// underlying representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Id<T> {
    uuid: Uuid,
    #[serde(skip)]
    _marker: std::marker::PhantomData<T>,
}

impl<T> Id<T> {
    /// Create a new random identifier (UUID v4).
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Create an identifier from a known UUID, e.g. when loading a record
    /// from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            _marker: std::marker::PhantomData,
        }
    }

    /// Get the underlying UUID.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uuid)
    }
}

impl<T> FromStr for Id<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_uuid(Uuid::parse_str(s)?))
    }
}

/// Marker type for users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserMarker;
/// Identifier for a user.
pub type UserId = Id<UserMarker>;

/// Marker type for channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelMarker;
/// Identifier for a channel.
pub type ChannelId = Id<ChannelMarker>;

/// Marker type for channel messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageMarker;
/// Identifier for a channel message.
pub type MessageId = Id<MessageMarker>;

/// Marker type for channel memberships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MembershipMarker;
/// Identifier for a channel membership record.
pub type MembershipId = Id<MembershipMarker>;
