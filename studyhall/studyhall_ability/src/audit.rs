//! Decision audit log.
//!
//! A bounded, thread-safe record of permission decisions, keyed by the
//! acting user. Enforcement points may attach one to keep a trail of what
//! was allowed and denied without logging message payloads.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

use studyhall_core::id::UserId;

use crate::model::{Action, SubjectKind};

/// One recorded permission decision.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    /// When the decision was made.
    pub timestamp: DateTime<Utc>,

    /// The user the ability was built for.
    pub user_id: UserId,

    /// The attempted action.
    pub action: Action,

    /// The kind of subject the action targeted.
    pub subject_kind: SubjectKind,

    /// Whether the action was allowed.
    pub allowed: bool,
}

/// A thread-safe audit log of permission decisions.
pub struct AuditLog {
    /// Map from user ID to that user's decisions, oldest first.
    entries: RwLock<HashMap<UserId, Vec<AuditEntry>>>,

    /// Maximum number of retained decisions per user.
    max_entries_per_user: usize,
}

impl AuditLog {
    /// Creates a new audit log retaining at most `max_entries_per_user`
    /// decisions per user.
    pub fn new(max_entries_per_user: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries_per_user,
        }
    }

    /// Records a permission decision.
    pub fn record(&self, user_id: UserId, action: Action, subject_kind: SubjectKind, allowed: bool) {
        let entry = AuditEntry {
            timestamp: Utc::now(),
            user_id,
            action,
            subject_kind,
            allowed,
        };

        let mut entries = self.entries.write().unwrap();
        let user_entries = entries.entry(user_id).or_default();
        user_entries.push(entry);

        if user_entries.len() > self.max_entries_per_user {
            let excess = user_entries.len() - self.max_entries_per_user;
            user_entries.drain(0..excess);
        }
    }

    /// The recorded decisions for a user, oldest first.
    pub fn entries_for(&self, user_id: UserId) -> Vec<AuditEntry> {
        let entries = self.entries.read().unwrap();
        entries.get(&user_id).cloned().unwrap_or_default()
    }

    /// Drops the recorded decisions for a user.
    pub fn clear_user(&self, user_id: UserId) {
        let mut entries = self.entries.write().unwrap();
        entries.remove(&user_id);
    }

    /// Drops all recorded decisions.
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap();
        entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_read_back() {
        let log = AuditLog::new(10);
        let user = UserId::new();

        log.record(user, Action::Post, SubjectKind::Message, false);
        log.record(user, Action::Update, SubjectKind::Channel, true);

        let entries = log.entries_for(user);
        assert_eq!(entries.len(), 2);
        assert!(!entries[0].allowed);
        assert_eq!(entries[0].action, Action::Post);
        assert!(entries[1].allowed);
        assert_eq!(entries[1].subject_kind, SubjectKind::Channel);
    }

    #[test]
    fn test_bounded_per_user() {
        let log = AuditLog::new(3);
        let user = UserId::new();

        for _ in 0..5 {
            log.record(user, Action::Post, SubjectKind::Message, false);
        }
        log.record(user, Action::Delete, SubjectKind::Message, true);

        let entries = log.entries_for(user);
        assert_eq!(entries.len(), 3);
        // The most recent decision survives trimming.
        assert_eq!(entries[2].action, Action::Delete);
    }

    #[test]
    fn test_users_are_isolated() {
        let log = AuditLog::new(10);
        let a = UserId::new();
        let b = UserId::new();

        log.record(a, Action::Post, SubjectKind::Message, true);

        assert_eq!(log.entries_for(a).len(), 1);
        assert!(log.entries_for(b).is_empty());

        log.clear_user(a);
        assert!(log.entries_for(a).is_empty());
    }

    #[test]
    fn test_clear_drops_all_users() {
        let log = AuditLog::new(10);
        let a = UserId::new();
        let b = UserId::new();

        log.record(a, Action::Post, SubjectKind::Message, true);
        log.record(b, Action::Remove, SubjectKind::Membership, false);

        log.clear();
        assert!(log.entries_for(a).is_empty());
        assert!(log.entries_for(b).is_empty());
    }
}
