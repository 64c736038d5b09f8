//! Channel, membership, and message records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ChannelId, MembershipId, MessageId, UserId};
use crate::types::Role;

/// A study-group channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// The unique ID of this channel.
    pub id: ChannelId,

    /// The user who created the channel.
    pub creator_id: UserId,

    /// The display name of the channel.
    pub name: String,

    /// A free-form description of the channel.
    pub description: String,

    /// When the channel was created.
    pub created_at: DateTime<Utc>,
}

impl Channel {
    /// Create a new channel record with a fresh ID.
    pub fn new(creator_id: UserId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: ChannelId::new(),
            creator_id,
            name: name.into(),
            description: description.into(),
            created_at: Utc::now(),
        }
    }
}

/// A membership record tying one user to one channel with a role.
///
/// Created when the channel is created (for the creator) or when a user
/// joins; destroyed on leave or removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelUser {
    /// The unique ID of this membership record.
    pub id: MembershipId,

    /// The user this membership belongs to.
    pub user_id: UserId,

    /// The channel this membership belongs to.
    pub channel_id: ChannelId,

    /// The role the user holds in this channel.
    pub role: Role,

    /// When the user joined the channel.
    pub joined_at: DateTime<Utc>,
}

impl ChannelUser {
    /// Create a new membership record with a fresh ID.
    pub fn new(user_id: UserId, channel_id: ChannelId, role: Role) -> Self {
        Self {
            id: MembershipId::new(),
            user_id,
            channel_id,
            role,
            joined_at: Utc::now(),
        }
    }
}

/// A message posted to a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// The unique ID of this message.
    pub id: MessageId,

    /// The channel the message was posted to.
    pub channel_id: ChannelId,

    /// The user who sent the message.
    pub sender_id: UserId,

    /// The message body.
    pub content: String,

    /// When the message was sent.
    pub sent_at: DateTime<Utc>,
}

impl ChannelMessage {
    /// Create a new message record with a fresh ID.
    pub fn new(channel_id: ChannelId, sender_id: UserId, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            channel_id,
            sender_id,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_new() {
        let creator = UserId::new();
        let channel = Channel::new(creator, "algebra", "Linear algebra study group");

        assert_eq!(channel.creator_id, creator);
        assert_eq!(channel.name, "algebra");
        assert_eq!(channel.description, "Linear algebra study group");
    }

    #[test]
    fn test_membership_new() {
        let user = UserId::new();
        let channel = ChannelId::new();
        let membership = ChannelUser::new(user, channel, Role::Member);

        assert_eq!(membership.user_id, user);
        assert_eq!(membership.channel_id, channel);
        assert_eq!(membership.role, Role::Member);
    }

    #[test]
    fn test_message_new() {
        let sender = UserId::new();
        let channel = ChannelId::new();
        let message = ChannelMessage::new(channel, sender, "hello");

        assert_eq!(message.channel_id, channel);
        assert_eq!(message.sender_id, sender);
        assert_eq!(message.content, "hello");
    }

    #[test]
    fn test_record_serde() {
        let channel = Channel::new(UserId::new(), "calc", "Calculus");
        let serialized = serde_json::to_string(&channel).unwrap();
        let deserialized: Channel = serde_json::from_str(&serialized).unwrap();
        assert_eq!(channel, deserialized);
    }
}
