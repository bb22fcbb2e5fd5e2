//! VCS interfaces.

use std::path::Path;

use async_trait::async_trait;

use crate::VcsError;

/// Outcome of [`VcsService::ensure_cloned`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneStatus {
    /// Repository was freshly cloned.
    Cloned,
    /// Working copy directory was already there.
    AlreadyPresent,
}

/// Version control adapter trait.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait VcsService: Send + Sync {
    /// Clone `clone_url` on `branch` into `dir`, unless `dir` already exists.
    async fn ensure_cloned(
        &self,
        clone_url: &str,
        branch: &str,
        dir: &Path,
    ) -> Result<CloneStatus, VcsError>;
    /// Pull `branch` from origin.
    async fn pull(&self, dir: &Path, branch: &str) -> Result<(), VcsError>;
    /// Force checkout a commit, discarding local modifications.
    async fn checkout(&self, dir: &Path, commit_id: &str) -> Result<(), VcsError>;
    /// Health check
    async fn health_check(&self) -> Result<(), VcsError>;
}
