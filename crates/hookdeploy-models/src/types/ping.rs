use serde::{Deserialize, Serialize};

/// GitHub ping event, sent when a webhook is created.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct GhPingEvent {
    /// Random zen sentence.
    #[serde(default)]
    pub zen: String,
    /// Webhook ID.
    #[serde(default)]
    pub hook_id: u64,
    /// Repository, for repository webhooks.
    pub repository: Option<GhPingRepository>,
}

/// Repository of a ping event.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct GhPingRepository {
    /// Full name.
    pub full_name: String,
}
