//! # Studyhall Core
//!
//! `studyhall_core` provides the fundamental building blocks shared by the
//! Studyhall chat system: strongly-typed identifiers, the error hierarchy,
//! and the domain records (channels, messages, memberships) that the
//! permission engine and the persistence layer exchange.
//!
//! ## Crate Structure
//!
//! - **error**: Error types for all Studyhall components
//! - **id**: Strongly-typed identifier types
//! - **types**: Domain records and the role enum

pub mod error;
pub mod id;
pub mod types;

// Re-export key types for convenience
pub use error::{AccessError, ChannelError, Error, Result};
pub use id::{ChannelId, MembershipId, MessageId, UserId};
pub use types::{Channel, ChannelMessage, ChannelUser, Role};
