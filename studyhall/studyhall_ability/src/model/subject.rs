//! Type-tagged subjects.
//!
//! A subject is a resource instance tagged with its type, so the evaluator
//! can filter rules by kind without structural inspection of the record.
//! Tagging always succeeds; malformed input is the caller's responsibility.

use serde::{Deserialize, Serialize};
use std::fmt;

use studyhall_core::types::{Channel, ChannelMessage, ChannelUser};

/// The closed set of resource types rules can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectKind {
    /// A channel record.
    Channel,

    /// A channel message record.
    Message,

    /// A channel membership record.
    Membership,
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectKind::Channel => write!(f, "Channel"),
            SubjectKind::Message => write!(f, "ChannelMessage"),
            SubjectKind::Membership => write!(f, "ChannelUser"),
        }
    }
}

/// A resource instance tagged with its type.
///
/// Subjects borrow the underlying record; the engine never stores or owns
/// domain data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Subject<'a> {
    /// A channel instance.
    Channel(&'a Channel),

    /// A message instance.
    Message(&'a ChannelMessage),

    /// A membership instance.
    Membership(&'a ChannelUser),
}

impl Subject<'_> {
    /// The type tag of this subject.
    pub fn kind(&self) -> SubjectKind {
        match self {
            Subject::Channel(_) => SubjectKind::Channel,
            Subject::Message(_) => SubjectKind::Message,
            Subject::Membership(_) => SubjectKind::Membership,
        }
    }
}

impl<'a> From<&'a Channel> for Subject<'a> {
    fn from(channel: &'a Channel) -> Self {
        Subject::Channel(channel)
    }
}

impl<'a> From<&'a ChannelMessage> for Subject<'a> {
    fn from(message: &'a ChannelMessage) -> Self {
        Subject::Message(message)
    }
}

impl<'a> From<&'a ChannelUser> for Subject<'a> {
    fn from(membership: &'a ChannelUser) -> Self {
        Subject::Membership(membership)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studyhall_core::id::UserId;
    use studyhall_core::types::Role;

    #[test]
    fn test_subject_kind() {
        let creator = UserId::new();
        let channel = Channel::new(creator, "algebra", "");
        let message = ChannelMessage::new(channel.id, creator, "hi");
        let membership = ChannelUser::new(creator, channel.id, Role::Creator);

        assert_eq!(Subject::from(&channel).kind(), SubjectKind::Channel);
        assert_eq!(Subject::from(&message).kind(), SubjectKind::Message);
        assert_eq!(Subject::from(&membership).kind(), SubjectKind::Membership);
    }

    #[test]
    fn test_subject_retains_record() {
        let channel = Channel::new(UserId::new(), "calc", "");
        let subject = Subject::from(&channel);

        match subject {
            Subject::Channel(c) => assert_eq!(c.id, channel.id),
            _ => panic!("Expected a channel subject"),
        }
    }

    #[test]
    fn test_subject_kind_wire_names() {
        // The display names match the tags the rest of the system logs.
        assert_eq!(SubjectKind::Channel.to_string(), "Channel");
        assert_eq!(SubjectKind::Message.to_string(), "ChannelMessage");
        assert_eq!(SubjectKind::Membership.to_string(), "ChannelUser");
    }
}
