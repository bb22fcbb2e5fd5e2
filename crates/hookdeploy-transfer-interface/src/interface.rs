//! Transfer interfaces.

use async_trait::async_trait;
use hookdeploy_config::RemoteTarget;
use tokio::io::AsyncRead;

use crate::TransferError;

/// Session on one remote target, able to create files.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait TransferSession: Send + Sync {
    /// Remote target of this session.
    fn target(&self) -> &RemoteTarget;
    /// Create or truncate `remote_path`, then stream `content` into it.
    ///
    /// Returns the written byte count.
    async fn write_file(
        &self,
        remote_path: &str,
        content: Box<dyn AsyncRead + Send + Unpin>,
    ) -> Result<u64, TransferError>;
    /// Health check
    async fn health_check(&self) -> Result<(), TransferError>;
}
