//! # Studyhall Ability
//!
//! This crate implements Studyhall's rule-based permission engine. An
//! [`Ability`] is an immutable set of granted-action rules computed from one
//! membership record; [`Ability::can`] evaluates that rule set against a
//! concrete, type-tagged [`Subject`] and returns allow or deny.
//!
//! The model is a permissive union with no deny rules: an action is allowed
//! if and only if at least one rule matches the `(action, subject kind)`
//! pair and the rule's ownership condition, if any, holds on the subject
//! instance. Absence of a matching rule is denial.
//!
//! The engine is purely functional: no I/O, no shared mutable state, no
//! caching across evaluation contexts. Build the ability fresh for each
//! request from the membership as read at enforcement time.
//!
//! ## Usage Example
//!
//! ```
//! use studyhall_ability::{Ability, Action, Subject};
//! use studyhall_core::{Channel, ChannelUser, Role, UserId};
//!
//! let creator = UserId::new();
//! let channel = Channel::new(creator, "algebra", "Study group");
//! let membership = ChannelUser::new(creator, channel.id, Role::Creator);
//!
//! let ability = Ability::grant(&membership);
//! assert!(ability.can(Action::Update, &Subject::from(&channel)));
//! ```

pub mod ability;
pub mod audit;
pub mod model;

// Re-export commonly used types
pub use ability::Ability;
pub use audit::{AuditEntry, AuditLog};
pub use model::{Action, Condition, Rule, Subject, SubjectKind};
