use serde::{Deserialize, Serialize};

/// GitHub push event.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct GhPushEvent {
    /// Pushed reference (`refs/heads/<branch>`).
    #[serde(rename = "ref", default)]
    pub reference: String,
    /// Commit before the push.
    #[serde(default)]
    pub before: String,
    /// Commit after the push.
    #[serde(default)]
    pub after: String,
    /// Repository.
    pub repository: GhPushRepository,
    /// Pushed commits, oldest first.
    #[serde(default)]
    pub commits: Vec<GhCommit>,
    /// Head commit, absent on branch deletion.
    pub head_commit: Option<GhCommit>,
    /// Pusher.
    pub pusher: Option<GhCommitUser>,
    /// Branch creation.
    #[serde(default)]
    pub created: bool,
    /// Branch deletion.
    #[serde(default)]
    pub deleted: bool,
    /// Forced push.
    #[serde(default)]
    pub forced: bool,
}

/// Repository of a push event.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct GhPushRepository {
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Full name.
    #[serde(default)]
    pub full_name: String,
    /// Clone URL.
    pub clone_url: String,
    /// Default branch.
    pub default_branch: String,
}

/// Commit of a push event.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct GhCommit {
    /// Commit hash.
    pub id: String,
    /// Message.
    #[serde(default)]
    pub message: String,
    /// Timestamp.
    #[serde(default)]
    pub timestamp: String,
    /// Added paths.
    #[serde(default)]
    pub added: Vec<String>,
    /// Modified paths.
    #[serde(default)]
    pub modified: Vec<String>,
    /// Removed paths.
    #[serde(default)]
    pub removed: Vec<String>,
    /// Author.
    pub author: Option<GhCommitUser>,
}

/// Commit author or pusher.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct GhCommitUser {
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Email.
    pub email: Option<String>,
    /// Username.
    pub username: Option<String>,
}
