//! VCS wrappers.

use std::path::Path;

use async_trait::async_trait;
use hookdeploy_config::Config;
use hookdeploy_vcs_git::GitCliService;
use hookdeploy_vcs_interface::{CloneStatus, VcsError, VcsService};

use crate::metrics::GIT_COMMANDS;

/// VCS service with metrics.
pub struct MetricsVcsService {
    inner: Box<dyn VcsService>,
}

impl MetricsVcsService {
    /// Creates a new git service.
    pub fn new(config: &Config) -> Self {
        Self::wrap(Box::new(GitCliService::new(
            config.git.binary.clone(),
            config.git.timeout_duration(),
        )))
    }

    /// Wraps an existing service.
    pub fn wrap(inner: Box<dyn VcsService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl VcsService for MetricsVcsService {
    async fn ensure_cloned(
        &self,
        clone_url: &str,
        branch: &str,
        dir: &Path,
    ) -> Result<CloneStatus, VcsError> {
        let status = self.inner.ensure_cloned(clone_url, branch, dir).await?;
        if status == CloneStatus::Cloned {
            GIT_COMMANDS.inc();
        }
        Ok(status)
    }

    async fn pull(&self, dir: &Path, branch: &str) -> Result<(), VcsError> {
        GIT_COMMANDS.inc();
        self.inner.pull(dir, branch).await
    }

    async fn checkout(&self, dir: &Path, commit_id: &str) -> Result<(), VcsError> {
        GIT_COMMANDS.inc();
        self.inner.checkout(dir, commit_id).await
    }

    async fn health_check(&self) -> Result<(), VcsError> {
        self.inner.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use hookdeploy_vcs_interface::MockVcsService;

    use super::*;

    #[tokio::test]
    async fn counts_commands() {
        let mut inner = MockVcsService::new();
        inner
            .expect_checkout()
            .once()
            .return_once(|_, _| Ok(()));
        inner
            .expect_ensure_cloned()
            .once()
            .return_once(|_, _, _| Ok(CloneStatus::AlreadyPresent));

        let service = MetricsVcsService::wrap(Box::new(inner));
        let before = GIT_COMMANDS.get();

        service
            .ensure_cloned("https://github.com/me/test.git", "main", Path::new("/tmp/x"))
            .await
            .unwrap();
        service.checkout(Path::new("/tmp/x"), "abcd").await.unwrap();

        // Other tests may run in parallel.
        assert!(GIT_COMMANDS.get() > before);
    }
}
