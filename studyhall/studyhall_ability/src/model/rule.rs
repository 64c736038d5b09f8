//! Rules and ownership conditions.

use serde::{Deserialize, Serialize};
use std::fmt;

use studyhall_core::id::{MembershipId, UserId};

use super::{Subject, SubjectKind};

/// A verb describing an attempted operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Post a new message to a channel.
    Post,

    /// Update an existing record.
    Update,

    /// Delete an existing record.
    Delete,

    /// Remove a membership from a channel.
    Remove,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Post => write!(f, "post"),
            Action::Update => write!(f, "update"),
            Action::Delete => write!(f, "delete"),
            Action::Remove => write!(f, "remove"),
        }
    }
}

/// An ownership condition narrowing a rule to instances related to the
/// acting user.
///
/// The set of checkable fields is closed per subject type, so a rule can
/// never reference a field its subject does not carry. Applied to a subject
/// of the wrong kind, a condition simply does not hold; that is a non-match,
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    /// Holds for a message whose `sender_id` equals the given user.
    SenderIs(UserId),

    /// Holds for a channel whose `creator_id` equals the given user.
    CreatorIs(UserId),

    /// Holds for the membership record with the given ID.
    MembershipIs(MembershipId),
}

impl Condition {
    /// Whether this condition is satisfied by the given subject instance.
    pub fn holds_for(&self, subject: &Subject<'_>) -> bool {
        match (self, subject) {
            (Condition::SenderIs(user_id), Subject::Message(message)) => {
                message.sender_id == *user_id
            }
            (Condition::CreatorIs(user_id), Subject::Channel(channel)) => {
                channel.creator_id == *user_id
            }
            (Condition::MembershipIs(membership_id), Subject::Membership(membership)) => {
                membership.id == *membership_id
            }
            _ => false,
        }
    }
}

/// A granted-action rule.
///
/// A rule permits `action` on subjects of `subject_kind`, optionally
/// narrowed by an ownership condition. Rules only ever grant; there is no
/// deny variant and no override ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// The permitted action.
    pub action: Action,

    /// The subject type the rule applies to.
    pub subject_kind: SubjectKind,

    /// The ownership condition, if any.
    pub condition: Option<Condition>,
}

impl Rule {
    /// Create a rule permitting `action` on any instance of `subject_kind`.
    pub fn allow(action: Action, subject_kind: SubjectKind) -> Self {
        Self {
            action,
            subject_kind,
            condition: None,
        }
    }

    /// Create a rule permitting `action` only on instances satisfying
    /// `condition`.
    pub fn allow_if(action: Action, subject_kind: SubjectKind, condition: Condition) -> Self {
        Self {
            action,
            subject_kind,
            condition: Some(condition),
        }
    }

    /// Whether this rule permits `action` on the given subject instance.
    pub fn permits(&self, action: Action, subject: &Subject<'_>) -> bool {
        if self.action != action || self.subject_kind != subject.kind() {
            return false;
        }

        match &self.condition {
            None => true,
            Some(condition) => condition.holds_for(subject),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.subject_kind)?;

        match &self.condition {
            Some(Condition::SenderIs(id)) => write!(f, " where sender is {}", id),
            Some(Condition::CreatorIs(id)) => write!(f, " where creator is {}", id),
            Some(Condition::MembershipIs(id)) => write!(f, " where membership is {}", id),
            None => Ok(()),
        }
    }
}
