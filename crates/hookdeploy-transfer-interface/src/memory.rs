//! In-memory transfer session.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hookdeploy_config::RemoteTarget;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::{TransferError, TransferSession};

/// Write recorded by a [`MemoryTransferSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
    /// Target host.
    pub host: String,
    /// Remote path.
    pub remote_path: String,
    /// Written content.
    pub content: Vec<u8>,
}

/// Write log, shareable between sessions to observe global ordering.
pub type WriteLog = Arc<Mutex<Vec<RecordedWrite>>>;

/// Transfer session recording writes in memory.
pub struct MemoryTransferSession {
    target: RemoteTarget,
    log: WriteLog,
    failing_path: Option<String>,
}

impl MemoryTransferSession {
    /// Creates a new memory session appending to `log`.
    pub fn new(target: RemoteTarget, log: WriteLog) -> Self {
        Self {
            target,
            log,
            failing_path: None,
        }
    }

    /// Fail writes to `remote_path`.
    pub fn failing_on<S: Into<String>>(mut self, remote_path: S) -> Self {
        self.failing_path = Some(remote_path.into());
        self
    }

    /// Recorded writes.
    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TransferSession for MemoryTransferSession {
    fn target(&self) -> &RemoteTarget {
        &self.target
    }

    async fn write_file(
        &self,
        remote_path: &str,
        mut content: Box<dyn AsyncRead + Send + Unpin>,
    ) -> Result<u64, TransferError> {
        if self.failing_path.as_deref() == Some(remote_path) {
            return Err(TransferError::Write {
                path: remote_path.into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied"),
            });
        }

        let mut buffer = Vec::new();
        let size = content
            .read_to_end(&mut buffer)
            .await
            .map_err(|e| TransferError::Write {
                path: remote_path.into(),
                source: e,
            })?;

        self.log
            .lock()
            .map_err(|e| TransferError::ImplementationError {
                source: e.to_string().into(),
            })?
            .push(RecordedWrite {
                host: self.target.host.clone(),
                remote_path: remote_path.into(),
                content: buffer,
            });

        Ok(size as u64)
    }

    async fn health_check(&self) -> Result<(), TransferError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn target(host: &str) -> RemoteTarget {
        RemoteTarget {
            host: host.into(),
            port: 22,
            user: "deploy".into(),
            folder: "/srv".into(),
        }
    }

    #[tokio::test]
    async fn records_writes() {
        let log = WriteLog::default();
        let session = MemoryTransferSession::new(target("web1"), log.clone());

        let size = session
            .write_file("/srv/a.txt", Box::new(&b"hello"[..]))
            .await
            .unwrap();

        assert_eq!(size, 5);
        assert_eq!(
            session.writes(),
            vec![RecordedWrite {
                host: "web1".into(),
                remote_path: "/srv/a.txt".into(),
                content: b"hello".to_vec(),
            }]
        );
    }

    #[tokio::test]
    async fn failing_path() {
        let session =
            MemoryTransferSession::new(target("web1"), WriteLog::default()).failing_on("/srv/b.txt");

        assert!(session
            .write_file("/srv/b.txt", Box::new(&b""[..]))
            .await
            .is_err());
        assert!(session.writes().is_empty());
    }
}
