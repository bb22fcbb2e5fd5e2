use std::path::{Component, Path};

use crate::{types::GhPushEvent, ModelError};

/// Head commit of a push, with its changed paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadCommit {
    /// Commit hash.
    pub id: String,
    /// Added paths, relative to the repository root.
    pub added: Vec<String>,
    /// Modified paths, relative to the repository root.
    pub modified: Vec<String>,
    /// Removed paths, relative to the repository root.
    pub removed: Vec<String>,
}

/// Validated push notification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushNotification {
    /// Repository clone URL.
    pub clone_url: String,
    /// Repository default branch.
    pub default_branch: String,
    /// Pushed reference.
    pub reference: String,
    /// Pushed commit hashes, oldest first.
    pub commit_ids: Vec<String>,
    /// Head commit.
    pub head_commit: HeadCommit,
}

impl TryFrom<GhPushEvent> for PushNotification {
    type Error = ModelError;

    fn try_from(event: GhPushEvent) -> Result<Self, Self::Error> {
        let head_commit = event.head_commit.ok_or(ModelError::MissingHeadCommit)?;

        let clone_url = validate_argument("repository.clone_url", event.repository.clone_url)?;
        let default_branch =
            validate_argument("repository.default_branch", event.repository.default_branch)?;
        let id = validate_commit_id(head_commit.id)?;

        for path in head_commit
            .added
            .iter()
            .chain(head_commit.modified.iter())
            .chain(head_commit.removed.iter())
        {
            validate_relative_path(path)?;
        }

        Ok(Self {
            clone_url,
            default_branch,
            reference: event.reference,
            commit_ids: event.commits.into_iter().map(|c| c.id).collect(),
            head_commit: HeadCommit {
                id,
                added: head_commit.added,
                modified: head_commit.modified,
                removed: head_commit.removed,
            },
        })
    }
}

// Values end up as git arguments.
fn validate_argument(field: &'static str, value: String) -> Result<String, ModelError> {
    if value.is_empty() {
        Err(ModelError::MissingField { field })
    } else if value.starts_with('-') {
        Err(ModelError::UnsafeArgument { field, value })
    } else {
        Ok(value)
    }
}

fn validate_commit_id(id: String) -> Result<String, ModelError> {
    let valid_length = (4..=64).contains(&id.len());
    if valid_length && id.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(id)
    } else {
        Err(ModelError::InvalidCommitId { id })
    }
}

fn validate_relative_path(path: &str) -> Result<(), ModelError> {
    let is_safe = !path.is_empty()
        && Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

    if is_safe {
        Ok(())
    } else {
        Err(ModelError::UnsafePath { path: path.into() })
    }
}
