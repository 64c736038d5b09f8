//! Ability construction and evaluation.
//!
//! An [`Ability`] is built once per evaluation context from the acting
//! user's membership record and is immutable afterwards. Because role and
//! identity are request-scoped, abilities must never be cached across
//! requests.

use studyhall_core::types::{ChannelUser, Role};

use crate::model::{Action, Condition, Rule, Subject, SubjectKind};

/// The immutable set of granted rules computed for one membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ability {
    rules: Vec<Rule>,
}

impl Ability {
    /// Build the ability for the given membership record.
    ///
    /// Pure function of the membership's role and ids. Grants by role:
    ///
    /// - `Creator` and `Tutor` may post and delete any message in the
    ///   channel.
    /// - Every other role (the restrictive default for any future role
    ///   value) may update and delete only its own messages, and remove
    ///   only its own membership (self-leave).
    /// - `Creator` may additionally remove any membership.
    /// - Every role may update and delete a channel only when it is the
    ///   channel's creator, which narrows those verbs to the creator in
    ///   practice.
    pub fn grant(membership: &ChannelUser) -> Self {
        let mut rules = Vec::new();

        if membership.role.is_moderator() {
            rules.push(Rule::allow(Action::Post, SubjectKind::Message));
            rules.push(Rule::allow(Action::Delete, SubjectKind::Message));
        } else {
            rules.push(Rule::allow_if(
                Action::Update,
                SubjectKind::Message,
                Condition::SenderIs(membership.user_id),
            ));
            rules.push(Rule::allow_if(
                Action::Delete,
                SubjectKind::Message,
                Condition::SenderIs(membership.user_id),
            ));
            rules.push(Rule::allow_if(
                Action::Remove,
                SubjectKind::Membership,
                Condition::MembershipIs(membership.id),
            ));
        }

        if membership.role == Role::Creator {
            rules.push(Rule::allow(Action::Remove, SubjectKind::Membership));
        }

        rules.push(Rule::allow_if(
            Action::Update,
            SubjectKind::Channel,
            Condition::CreatorIs(membership.user_id),
        ));
        rules.push(Rule::allow_if(
            Action::Delete,
            SubjectKind::Channel,
            Condition::CreatorIs(membership.user_id),
        ));

        Self { rules }
    }

    /// Whether this ability permits `action` on the given subject.
    ///
    /// A logical OR across the rule set: allow if any rule matches the
    /// `(action, subject kind)` pair and its condition, if present, holds
    /// on the subject instance. Rule order is irrelevant.
    pub fn can(&self, action: Action, subject: &Subject<'_>) -> bool {
        self.rules.iter().any(|rule| rule.permits(action, subject))
    }

    /// The granted rules, for inspection and logging.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}
