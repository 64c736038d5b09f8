//! The channel service and enforcement point.
//!
//! Every mutating operation resolves the caller's membership before
//! anything else. A caller with no membership in the target channel is
//! answered with `AccessError::NotFound`, exactly as if the channel did
//! not exist; only then is the per-request `Ability` built and the action
//! checked. The ability is constructed fresh on every call from the
//! membership as read at enforcement time, never cached.

use std::sync::Arc;

use tracing::{debug, warn};

use studyhall_ability::{Ability, Action, AuditLog, Subject};
use studyhall_core::error::{AccessError, ChannelError, Result};
use studyhall_core::id::{ChannelId, MembershipId, MessageId, UserId};
use studyhall_core::types::{Channel, ChannelMessage, ChannelUser, Role};

use crate::store::ChannelStore;

/// A partial update to a channel's mutable attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelPatch {
    /// New display name, if changing.
    pub name: Option<String>,

    /// New description, if changing.
    pub description: Option<String>,
}

/// The channel service.
///
/// Wraps a [`ChannelStore`] and performs the visibility and authorization
/// checks before every mutation.
pub struct ChannelService<S> {
    /// The backing store.
    store: S,

    /// Optional audit log for recording permission decisions.
    audit: Option<Arc<AuditLog>>,
}

impl<S> ChannelService<S>
where
    S: ChannelStore,
{
    /// Creates a new channel service over the given store.
    pub fn new(store: S) -> Self {
        Self { store, audit: None }
    }

    /// Creates a new channel service that records permission decisions in
    /// the given audit log.
    pub fn with_audit(store: S, audit: Arc<AuditLog>) -> Self {
        Self {
            store,
            audit: Some(audit),
        }
    }

    /// Gets a reference to the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves the channel and the caller's membership in it.
    ///
    /// A missing channel and a missing membership are indistinguishable to
    /// the caller: both are `NotFound`. Membership gates visibility.
    fn visible(&self, user_id: UserId, channel_id: ChannelId) -> Result<(Channel, ChannelUser)> {
        let channel = self.store.channel(channel_id)?;
        let membership = self
            .store
            .membership_of(user_id, channel_id)?
            .ok_or(AccessError::NotFound)?;
        Ok((channel, membership))
    }

    /// Builds the caller's ability and checks the action against the
    /// subject, recording the decision.
    fn authorize(
        &self,
        membership: &ChannelUser,
        action: Action,
        subject: &Subject<'_>,
    ) -> Result<()> {
        let ability = Ability::grant(membership);
        let allowed = ability.can(action, subject);

        if let Some(audit) = &self.audit {
            audit.record(membership.user_id, action, subject.kind(), allowed);
        }

        if allowed {
            debug!(
                user = %membership.user_id,
                action = %action,
                subject = %subject.kind(),
                "action permitted"
            );
            Ok(())
        } else {
            warn!(
                user = %membership.user_id,
                action = %action,
                subject = %subject.kind(),
                "action denied"
            );
            Err(AccessError::Forbidden.into())
        }
    }

    /// Creates a channel and its creator's membership.
    ///
    /// Any authenticated user may create a channel; the creator is added
    /// as the first member with the `Creator` role, so the member count
    /// starts at one.
    pub fn create_channel(
        &self,
        creator_id: UserId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Channel> {
        let channel = Channel::new(creator_id, name, description);
        self.store.insert_channel(channel.clone())?;

        let membership = ChannelUser::new(creator_id, channel.id, Role::Creator);
        self.store.insert_membership(membership)?;

        debug!(channel = %channel.id, creator = %creator_id, "channel created");
        Ok(channel)
    }

    /// Gets a channel by ID. Public read.
    pub fn channel(&self, channel_id: ChannelId) -> Result<Channel> {
        self.store.channel(channel_id)
    }

    /// Lists all channels. Public read.
    pub fn channels(&self) -> Result<Vec<Channel>> {
        self.store.channels()
    }

    /// Lists the members of a channel. Public read.
    pub fn members(&self, channel_id: ChannelId) -> Result<Vec<ChannelUser>> {
        self.store.channel(channel_id)?;
        self.store.members(channel_id)
    }

    /// Counts the members of a channel. Public read.
    pub fn member_count(&self, channel_id: ChannelId) -> Result<usize> {
        self.store.channel(channel_id)?;
        self.store.member_count(channel_id)
    }

    /// Gets one membership record of a channel. Public read.
    pub fn member(&self, channel_id: ChannelId, membership_id: MembershipId) -> Result<ChannelUser> {
        self.store.channel(channel_id)?;
        let membership = self.store.membership(membership_id)?;
        if membership.channel_id != channel_id {
            return Err(ChannelError::MemberNotFound(membership_id).into());
        }
        Ok(membership)
    }

    /// Updates a channel's mutable attributes.
    pub fn update_channel(
        &self,
        user_id: UserId,
        channel_id: ChannelId,
        patch: ChannelPatch,
    ) -> Result<Channel> {
        let (mut channel, membership) = self.visible(user_id, channel_id)?;
        self.authorize(&membership, Action::Update, &Subject::from(&channel))?;

        if let Some(name) = patch.name {
            channel.name = name;
        }
        if let Some(description) = patch.description {
            channel.description = description;
        }

        self.store.update_channel(channel.clone())?;
        Ok(channel)
    }

    /// Deletes a channel along with its memberships and messages.
    pub fn delete_channel(&self, user_id: UserId, channel_id: ChannelId) -> Result<()> {
        let (channel, membership) = self.visible(user_id, channel_id)?;
        self.authorize(&membership, Action::Delete, &Subject::from(&channel))?;

        for member in self.store.members(channel_id)? {
            self.store.remove_membership(member.id)?;
        }
        for message in self.store.messages(channel_id)? {
            self.store.remove_message(message.id)?;
        }
        self.store.remove_channel(channel_id)?;

        debug!(channel = %channel_id, "channel deleted");
        Ok(())
    }

    /// Joins a channel as an ordinary member.
    ///
    /// Joining only requires the channel to exist; there is no capability
    /// to check because the membership being created is the thing the
    /// ability would be built from.
    pub fn join_channel(&self, user_id: UserId, channel_id: ChannelId) -> Result<ChannelUser> {
        self.store.channel(channel_id)?;

        let membership = ChannelUser::new(user_id, channel_id, Role::Member);
        self.store.insert_membership(membership.clone())?;

        debug!(channel = %channel_id, user = %user_id, "user joined channel");
        Ok(membership)
    }

    /// Leaves a channel: removes the caller's own membership.
    pub fn leave_channel(&self, user_id: UserId, channel_id: ChannelId) -> Result<()> {
        let (_, membership) = self.visible(user_id, channel_id)?;
        self.authorize(&membership, Action::Remove, &Subject::from(&membership))?;

        self.store.remove_membership(membership.id)?;
        debug!(channel = %channel_id, user = %user_id, "user left channel");
        Ok(())
    }

    /// Removes a member from a channel.
    ///
    /// The creator may remove anyone; everyone else may only remove their
    /// own membership, which makes this equivalent to [`leave_channel`]
    /// for them.
    ///
    /// [`leave_channel`]: ChannelService::leave_channel
    pub fn remove_member(
        &self,
        actor_id: UserId,
        channel_id: ChannelId,
        membership_id: MembershipId,
    ) -> Result<()> {
        let (_, actor_membership) = self.visible(actor_id, channel_id)?;

        let target = self.store.membership(membership_id)?;
        if target.channel_id != channel_id {
            return Err(ChannelError::MemberNotFound(membership_id).into());
        }

        self.authorize(&actor_membership, Action::Remove, &Subject::from(&target))?;

        self.store.remove_membership(target.id)?;
        debug!(channel = %channel_id, member = %membership_id, "member removed");
        Ok(())
    }

    /// Posts a message to a channel.
    ///
    /// The candidate message is built first and checked as the subject, so
    /// the same rule shape covers posting as covers the other message
    /// verbs. Plain members hold no post rule and are forbidden.
    pub fn post_message(
        &self,
        user_id: UserId,
        channel_id: ChannelId,
        content: impl Into<String>,
    ) -> Result<ChannelMessage> {
        let (_, membership) = self.visible(user_id, channel_id)?;

        let message = ChannelMessage::new(channel_id, user_id, content);
        self.authorize(&membership, Action::Post, &Subject::from(&message))?;

        self.store.insert_message(message.clone())?;
        Ok(message)
    }

    /// Lists the messages of a channel. Requires membership.
    pub fn messages(&self, user_id: UserId, channel_id: ChannelId) -> Result<Vec<ChannelMessage>> {
        self.visible(user_id, channel_id)?;
        self.store.messages(channel_id)
    }

    /// Updates the content of a message.
    pub fn update_message(
        &self,
        user_id: UserId,
        channel_id: ChannelId,
        message_id: MessageId,
        content: impl Into<String>,
    ) -> Result<ChannelMessage> {
        let (_, membership) = self.visible(user_id, channel_id)?;

        let mut message = self.store.message(message_id)?;
        if message.channel_id != channel_id {
            return Err(ChannelError::MessageNotFound(message_id).into());
        }

        self.authorize(&membership, Action::Update, &Subject::from(&message))?;

        message.content = content.into();
        self.store.update_message(message.clone())?;
        Ok(message)
    }

    /// Deletes a message.
    pub fn delete_message(
        &self,
        user_id: UserId,
        channel_id: ChannelId,
        message_id: MessageId,
    ) -> Result<()> {
        let (_, membership) = self.visible(user_id, channel_id)?;

        let message = self.store.message(message_id)?;
        if message.channel_id != channel_id {
            return Err(ChannelError::MessageNotFound(message_id).into());
        }

        self.authorize(&membership, Action::Delete, &Subject::from(&message))?;

        self.store.remove_message(message.id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryChannelStore;

    fn service() -> ChannelService<InMemoryChannelStore> {
        ChannelService::new(InMemoryChannelStore::new())
    }

    #[test]
    fn test_create_channel_adds_creator_membership() {
        let service = service();
        let creator = UserId::new();

        let channel = service.create_channel(creator, "algebra", "").unwrap();

        assert_eq!(service.member_count(channel.id).unwrap(), 1);
        let members = service.members(channel.id).unwrap();
        assert_eq!(members[0].user_id, creator);
        assert_eq!(members[0].role, Role::Creator);
    }

    #[test]
    fn test_non_member_update_reads_as_not_found() {
        let service = service();
        let creator = UserId::new();
        let outsider = UserId::new();

        let channel = service.create_channel(creator, "algebra", "").unwrap();

        let err = service
            .update_channel(outsider, channel.id, ChannelPatch::default())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_member_update_reads_as_forbidden() {
        let service = service();
        let creator = UserId::new();
        let member = UserId::new();

        let channel = service.create_channel(creator, "algebra", "").unwrap();
        service.join_channel(member, channel.id).unwrap();

        let err = service
            .update_channel(member, channel.id, ChannelPatch::default())
            .unwrap_err();
        assert!(err.is_forbidden());
    }

    #[test]
    fn test_creator_update_succeeds() {
        let service = service();
        let creator = UserId::new();

        let channel = service.create_channel(creator, "algebra", "").unwrap();
        let patch = ChannelPatch {
            name: Some("linear algebra".to_string()),
            description: None,
        };

        let updated = service.update_channel(creator, channel.id, patch).unwrap();
        assert_eq!(updated.name, "linear algebra");
        assert_eq!(service.channel(channel.id).unwrap().name, "linear algebra");
    }

    #[test]
    fn test_member_cannot_post() {
        let service = service();
        let creator = UserId::new();
        let member = UserId::new();

        let channel = service.create_channel(creator, "algebra", "").unwrap();
        service.join_channel(member, channel.id).unwrap();

        let err = service.post_message(member, channel.id, "hi").unwrap_err();
        assert!(err.is_forbidden());

        // The creator can post.
        let message = service.post_message(creator, channel.id, "welcome").unwrap();
        assert_eq!(message.sender_id, creator);
    }

    #[test]
    fn test_non_member_post_reads_as_not_found() {
        let service = service();
        let creator = UserId::new();
        let outsider = UserId::new();

        let channel = service.create_channel(creator, "algebra", "").unwrap();

        let err = service.post_message(outsider, channel.id, "hi").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_channel_cascades() {
        let service = service();
        let creator = UserId::new();
        let member = UserId::new();

        let channel = service.create_channel(creator, "algebra", "").unwrap();
        service.join_channel(member, channel.id).unwrap();
        service.post_message(creator, channel.id, "welcome").unwrap();

        service.delete_channel(creator, channel.id).unwrap();

        assert!(service.channel(channel.id).is_err());
        assert_eq!(service.store().member_count(channel.id).unwrap(), 0);
        assert!(service.store().messages(channel.id).unwrap().is_empty());
    }

    #[test]
    fn test_audit_records_decisions() {
        let audit = Arc::new(AuditLog::new(16));
        let service = ChannelService::with_audit(InMemoryChannelStore::new(), audit.clone());
        let creator = UserId::new();
        let member = UserId::new();

        let channel = service.create_channel(creator, "algebra", "").unwrap();
        service.join_channel(member, channel.id).unwrap();
        let _ = service.post_message(member, channel.id, "hi");

        let entries = audit.entries_for(member);
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].allowed);
        assert_eq!(entries[0].action, Action::Post);
    }
}
