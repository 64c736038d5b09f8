//! # Studyhall Channels
//!
//! This crate implements the channel service: the persistence collaborator
//! (a [`ChannelStore`] trait with an in-memory implementation) and the
//! enforcement point ([`ChannelService`]) that sits between callers and the
//! store.
//!
//! Every mutating operation follows the same two-tier check before touching
//! state: membership gates *visibility* (a non-member is told the channel
//! does not exist), then the caller's [`Ability`](studyhall_ability::Ability)
//! gates the *action* (a visible resource with a denied action is
//! forbidden). Authorization is evaluated against the state as read at
//! enforcement time.

pub mod service;
pub mod store;

// Re-export commonly used types
pub use service::{ChannelPatch, ChannelService};
pub use store::{ChannelStore, InMemoryChannelStore};
