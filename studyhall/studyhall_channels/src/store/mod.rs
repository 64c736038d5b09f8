//! Channel storage.
//!
//! This module defines the persistence contract the service enforces
//! against. The store is a dumb record keeper: it knows nothing about
//! roles or permissions, and it must present a consistent snapshot of
//! channel, membership, and message state to each call.

mod in_memory;

pub use in_memory::InMemoryChannelStore;

use studyhall_core::error::Result;
use studyhall_core::id::{ChannelId, MembershipId, MessageId, UserId};
use studyhall_core::types::{Channel, ChannelMessage, ChannelUser};

/// Trait for channel storage.
pub trait ChannelStore: Send + Sync {
    /// Add a channel record.
    fn insert_channel(&self, channel: Channel) -> Result<()>;

    /// Get a channel by ID.
    ///
    /// Returns `ChannelError::NotFound` if no such channel exists.
    fn channel(&self, id: ChannelId) -> Result<Channel>;

    /// Replace an existing channel record.
    fn update_channel(&self, channel: Channel) -> Result<()>;

    /// Remove a channel record. Memberships and messages are removed
    /// separately by the caller.
    fn remove_channel(&self, id: ChannelId) -> Result<()>;

    /// List all channel records.
    fn channels(&self) -> Result<Vec<Channel>>;

    /// Add a membership record.
    ///
    /// Returns `ChannelError::AlreadyMember` if the user already holds a
    /// membership in the channel.
    fn insert_membership(&self, membership: ChannelUser) -> Result<()>;

    /// Get a membership record by ID.
    fn membership(&self, id: MembershipId) -> Result<ChannelUser>;

    /// Get the membership a user holds in a channel, if any.
    fn membership_of(&self, user_id: UserId, channel_id: ChannelId)
        -> Result<Option<ChannelUser>>;

    /// Remove a membership record.
    fn remove_membership(&self, id: MembershipId) -> Result<()>;

    /// List the membership records of a channel, in join order.
    fn members(&self, channel_id: ChannelId) -> Result<Vec<ChannelUser>>;

    /// Count the membership records of a channel.
    fn member_count(&self, channel_id: ChannelId) -> Result<usize>;

    /// Add a message record.
    fn insert_message(&self, message: ChannelMessage) -> Result<()>;

    /// Get a message by ID.
    fn message(&self, id: MessageId) -> Result<ChannelMessage>;

    /// Replace an existing message record.
    fn update_message(&self, message: ChannelMessage) -> Result<()>;

    /// Remove a message record.
    fn remove_message(&self, id: MessageId) -> Result<()>;

    /// List the messages of a channel, in post order.
    fn messages(&self, channel_id: ChannelId) -> Result<Vec<ChannelMessage>>;
}
