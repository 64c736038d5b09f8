use std::collections::HashSet;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use studyhall_core::error::{ChannelError, Result};
use studyhall_core::id::{ChannelId, MembershipId, MessageId, UserId};
use studyhall_core::types::{Channel, ChannelMessage, ChannelUser};

use super::ChannelStore;

/// An in-memory implementation of the ChannelStore trait.
///
/// Uses DashMap for thread-safe concurrent access, with secondary indexes
/// so membership-of lookups and per-channel listings stay cheap.
#[derive(Default)]
pub struct InMemoryChannelStore {
    /// Map from channel ID to channel record
    channels: DashMap<ChannelId, Channel>,

    /// Map from membership ID to membership record
    memberships: DashMap<MembershipId, ChannelUser>,

    /// Index from (user, channel) to the membership ID
    membership_index: DashMap<(UserId, ChannelId), MembershipId>,

    /// Index from channel ID to its membership IDs
    channel_members: DashMap<ChannelId, HashSet<MembershipId>>,

    /// Map from message ID to message record
    messages: DashMap<MessageId, ChannelMessage>,

    /// Index from channel ID to its message IDs, in post order
    channel_messages: DashMap<ChannelId, Vec<MessageId>>,
}

impl InMemoryChannelStore {
    /// Creates a new empty in-memory channel store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChannelStore for InMemoryChannelStore {
    fn insert_channel(&self, channel: Channel) -> Result<()> {
        self.channels.insert(channel.id, channel);
        Ok(())
    }

    fn channel(&self, id: ChannelId) -> Result<Channel> {
        self.channels
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or_else(|| ChannelError::NotFound(id).into())
    }

    fn update_channel(&self, channel: Channel) -> Result<()> {
        // Replace under a single lock so an update cannot resurrect a
        // concurrently removed channel.
        match self.channels.get_mut(&channel.id) {
            Some(mut entry) => {
                *entry = channel;
                Ok(())
            }
            None => Err(ChannelError::NotFound(channel.id).into()),
        }
    }

    fn remove_channel(&self, id: ChannelId) -> Result<()> {
        self.channels
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ChannelError::NotFound(id).into())
    }

    fn channels(&self) -> Result<Vec<Channel>> {
        let mut channels: Vec<Channel> =
            self.channels.iter().map(|entry| entry.clone()).collect();
        channels.sort_by_key(|channel| channel.created_at);
        Ok(channels)
    }

    fn insert_membership(&self, membership: ChannelUser) -> Result<()> {
        // The index entry doubles as the uniqueness reservation: occupancy
        // is checked and the slot claimed under one lock, so two racing
        // inserts for the same (user, channel) cannot both pass.
        let index_key = (membership.user_id, membership.channel_id);
        match self.membership_index.entry(index_key) {
            Entry::Occupied(_) => {
                return Err(ChannelError::AlreadyMember(membership.channel_id).into());
            }
            Entry::Vacant(slot) => {
                slot.insert(membership.id);
            }
        }

        self.channel_members
            .entry(membership.channel_id)
            .or_default()
            .insert(membership.id);
        self.memberships.insert(membership.id, membership);
        Ok(())
    }

    fn membership(&self, id: MembershipId) -> Result<ChannelUser> {
        self.memberships
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or_else(|| ChannelError::MemberNotFound(id).into())
    }

    fn membership_of(
        &self,
        user_id: UserId,
        channel_id: ChannelId,
    ) -> Result<Option<ChannelUser>> {
        let membership = self
            .membership_index
            .get(&(user_id, channel_id))
            .and_then(|entry| self.memberships.get(entry.value()))
            .map(|entry| entry.clone());
        Ok(membership)
    }

    fn remove_membership(&self, id: MembershipId) -> Result<()> {
        let (_, membership) = self
            .memberships
            .remove(&id)
            .ok_or(ChannelError::MemberNotFound(id))?;

        self.membership_index
            .remove(&(membership.user_id, membership.channel_id));
        if let Some(mut members) = self.channel_members.get_mut(&membership.channel_id) {
            members.remove(&id);
        }
        Ok(())
    }

    fn members(&self, channel_id: ChannelId) -> Result<Vec<ChannelUser>> {
        let ids = self
            .channel_members
            .get(&channel_id)
            .map(|entry| entry.clone())
            .unwrap_or_default();

        let mut members: Vec<ChannelUser> = ids
            .iter()
            .filter_map(|id| self.memberships.get(id).map(|entry| entry.clone()))
            .collect();
        members.sort_by_key(|membership| membership.joined_at);
        Ok(members)
    }

    fn member_count(&self, channel_id: ChannelId) -> Result<usize> {
        Ok(self
            .channel_members
            .get(&channel_id)
            .map(|entry| entry.len())
            .unwrap_or(0))
    }

    fn insert_message(&self, message: ChannelMessage) -> Result<()> {
        self.channel_messages
            .entry(message.channel_id)
            .or_default()
            .push(message.id);
        self.messages.insert(message.id, message);
        Ok(())
    }

    fn message(&self, id: MessageId) -> Result<ChannelMessage> {
        self.messages
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or_else(|| ChannelError::MessageNotFound(id).into())
    }

    fn update_message(&self, message: ChannelMessage) -> Result<()> {
        // Replace under a single lock so an update cannot resurrect a
        // concurrently removed message.
        match self.messages.get_mut(&message.id) {
            Some(mut entry) => {
                *entry = message;
                Ok(())
            }
            None => Err(ChannelError::MessageNotFound(message.id).into()),
        }
    }

    fn remove_message(&self, id: MessageId) -> Result<()> {
        let (_, message) = self
            .messages
            .remove(&id)
            .ok_or(ChannelError::MessageNotFound(id))?;

        if let Some(mut ids) = self.channel_messages.get_mut(&message.channel_id) {
            ids.retain(|message_id| *message_id != id);
        }
        Ok(())
    }

    fn messages(&self, channel_id: ChannelId) -> Result<Vec<ChannelMessage>> {
        let ids = self
            .channel_messages
            .get(&channel_id)
            .map(|entry| entry.clone())
            .unwrap_or_default();

        Ok(ids
            .iter()
            .filter_map(|id| self.messages.get(id).map(|entry| entry.clone()))
            .collect())
    }
}
