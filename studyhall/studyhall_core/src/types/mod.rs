//! Domain records used throughout the Studyhall system.
//!
//! These types are owned by the surrounding persistence layer; the
//! permission engine only reads them.

mod channel;
mod role;

pub use channel::{Channel, ChannelMessage, ChannelUser};
pub use role::Role;
