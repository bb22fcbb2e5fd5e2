//! Webhook payload types.

mod ping;
mod push;

pub use ping::{GhPingEvent, GhPingRepository};
pub use push::{GhCommit, GhCommitUser, GhPushEvent, GhPushRepository};
