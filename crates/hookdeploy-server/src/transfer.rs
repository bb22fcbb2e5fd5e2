//! Transfer wrappers.

use async_trait::async_trait;
use hookdeploy_config::RemoteTarget;
use hookdeploy_transfer_interface::{TransferError, TransferSession};
use tokio::io::AsyncRead;

use crate::metrics::SFTP_WRITES;

/// Transfer session with metrics.
pub struct MetricsTransferSession {
    inner: Box<dyn TransferSession>,
}

impl MetricsTransferSession {
    /// Wraps an existing session.
    pub fn wrap(inner: Box<dyn TransferSession>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TransferSession for MetricsTransferSession {
    fn target(&self) -> &RemoteTarget {
        self.inner.target()
    }

    async fn write_file(
        &self,
        remote_path: &str,
        content: Box<dyn AsyncRead + Send + Unpin>,
    ) -> Result<u64, TransferError> {
        SFTP_WRITES.inc();
        self.inner.write_file(remote_path, content).await
    }

    async fn health_check(&self) -> Result<(), TransferError> {
        self.inner.health_check().await
    }
}
