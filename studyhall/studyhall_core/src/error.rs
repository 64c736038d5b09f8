//! Error types for the Studyhall system.
//!
//! Errors are organized by subsystem: access-control outcomes surfaced by
//! enforcement points, and channel/persistence failures. The root `Error`
//! type wraps both, allowing uniform handling at the service boundary.

use crate::id::{ChannelId, MembershipId, MessageId};
use thiserror::Error;

/// Root error type for the Studyhall system.
#[derive(Debug, Error)]
pub enum Error {
    /// Access-control outcomes from enforcement points
    #[error("Access error: {0}")]
    Access(#[from] AccessError),

    /// Channel and persistence errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),
}

/// Outcomes an enforcement point surfaces to its caller.
///
/// The distinction is deliberate: a resource outside the requester's
/// membership scope reads as `NotFound` rather than `Forbidden`, so a
/// non-member cannot probe for the existence of channels they cannot see.
/// A visible resource with a denied action reads as `Forbidden`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// The resource does not exist or is not visible to the requester
    #[error("Resource not found")]
    NotFound,

    /// The resource is visible but the action is not permitted
    #[error("Action forbidden")]
    Forbidden,
}

/// Errors related to channel operations and storage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// Channel with the given ID was not found
    #[error("Channel not found: {0}")]
    NotFound(ChannelId),

    /// The user already holds a membership in the channel
    #[error("Already a member of channel {0}")]
    AlreadyMember(ChannelId),

    /// Membership record with the given ID was not found
    #[error("Member not found: {0}")]
    MemberNotFound(MembershipId),

    /// Message with the given ID was not found
    #[error("Message not found: {0}")]
    MessageNotFound(MessageId),
}

/// Result type used throughout the Studyhall system.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error maps to a not-found outcome at the boundary.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Access(AccessError::NotFound)
                | Error::Channel(ChannelError::NotFound(_))
                | Error::Channel(ChannelError::MemberNotFound(_))
                | Error::Channel(ChannelError::MessageNotFound(_))
        )
    }

    /// Whether this error maps to a forbidden outcome at the boundary.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Error::Access(AccessError::Forbidden))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let access_err = AccessError::Forbidden;
        let error: Error = access_err.into();
        assert!(matches!(error, Error::Access(_)));

        let channel_id = ChannelId::new();
        let channel_err = ChannelError::NotFound(channel_id);
        let error: Error = channel_err.into();
        assert!(matches!(error, Error::Channel(_)));
    }

    #[test]
    fn test_error_display() {
        let channel_id = ChannelId::new();
        let error: Error = ChannelError::NotFound(channel_id).into();
        let display = format!("{}", error);
        assert!(display.contains(&format!("Channel not found: {}", channel_id)));
    }

    #[test]
    fn test_boundary_mapping() {
        let err: Error = AccessError::NotFound.into();
        assert!(err.is_not_found());
        assert!(!err.is_forbidden());

        let err: Error = AccessError::Forbidden.into();
        assert!(err.is_forbidden());
        assert!(!err.is_not_found());

        let err: Error = ChannelError::MessageNotFound(MessageId::new()).into();
        assert!(err.is_not_found());

        let err: Error = ChannelError::AlreadyMember(ChannelId::new()).into();
        assert!(!err.is_not_found());
        assert!(!err.is_forbidden());
    }
}
