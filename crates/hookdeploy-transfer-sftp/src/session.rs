use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use hookdeploy_config::{Config, RemoteTarget, SshConfig};
use hookdeploy_transfer_interface::{TransferError, TransferSession};
use russh::client;
use russh_keys::key::KeyPair;
use russh_sftp::client::SftpSession;
use tokio::{
    io::{AsyncRead, AsyncWriteExt},
    sync::Mutex,
};
use tracing::{debug, info};

use crate::{errors::SftpError, handler::HostKeyHandler};

struct Connection {
    handle: client::Handle<HostKeyHandler>,
    sftp: SftpSession,
}

/// SFTP session on one remote target.
///
/// Writes are serialized. A closed SSH connection is reopened on next use.
pub struct SftpTransferSession {
    target: RemoteTarget,
    key: Arc<KeyPair>,
    ssh_config: Arc<client::Config>,
    strict_host_key_checking: bool,
    timeout: Duration,
    connection: Mutex<Option<Connection>>,
}

/// Load the private key used to authenticate on every remote.
pub fn load_private_key(config: &SshConfig) -> Result<Arc<KeyPair>, SftpError> {
    let passphrase = Some(config.key_passphrase.as_str()).filter(|p| !p.is_empty());
    russh_keys::load_secret_key(&config.key_path, passphrase)
        .map(Arc::new)
        .map_err(|e| SftpError::KeyError {
            path: config.key_path.clone(),
            source: e,
        })
}

/// Connect to every configured remote target.
pub async fn connect_all(config: &Config) -> Result<Vec<SftpTransferSession>, SftpError> {
    let key = load_private_key(&config.ssh)?;

    let mut sessions = Vec::with_capacity(config.transfer.targets.len());
    for target in &config.transfer.targets {
        sessions.push(
            SftpTransferSession::connect(
                target.clone(),
                key.clone(),
                config.ssh.strict_host_key_checking,
                config.transfer.timeout_duration(),
            )
            .await?,
        );
    }

    Ok(sessions)
}

impl SftpTransferSession {
    /// Open a session on `target`.
    pub async fn connect(
        target: RemoteTarget,
        key: Arc<KeyPair>,
        strict_host_key_checking: bool,
        timeout: Duration,
    ) -> Result<Self, SftpError> {
        let session = Self {
            target,
            key,
            ssh_config: Arc::new(client::Config {
                inactivity_timeout: None,
                keepalive_interval: Some(Duration::from_secs(30)),
                ..Default::default()
            }),
            strict_host_key_checking,
            timeout,
            connection: Mutex::new(None),
        };

        let connection = session.open_connection().await?;
        *session.connection.lock().await = Some(connection);

        Ok(session)
    }

    #[tracing::instrument(skip(self), fields(target = %self.target))]
    async fn open_connection(&self) -> Result<Connection, SftpError> {
        let handler = HostKeyHandler {
            host: self.target.host.clone(),
            port: self.target.port,
            strict: self.strict_host_key_checking,
        };

        let mut handle = client::connect(
            self.ssh_config.clone(),
            (self.target.host.as_str(), self.target.port),
            handler,
        )
        .await?;

        let authenticated = handle
            .authenticate_publickey(self.target.user.as_str(), self.key.clone())
            .await?;
        if !authenticated {
            return Err(SftpError::AuthenticationError {
                target: self.target.to_string(),
            });
        }

        let channel = handle.channel_open_session().await?;
        channel.request_subsystem(true, "sftp").await?;
        let sftp = SftpSession::new(channel.into_stream()).await?;

        info!(message = "SFTP session opened", target = %self.target);

        Ok(Connection { handle, sftp })
    }

    async fn ensure_connected<'a>(
        &self,
        slot: &'a mut Option<Connection>,
    ) -> Result<&'a mut Connection, SftpError> {
        if let Some(connection) = slot.take().filter(|c| !c.handle.is_closed()) {
            return Ok(slot.insert(connection));
        }

        debug!(message = "Reconnecting", target = %self.target);
        let connection = self.open_connection().await?;
        Ok(slot.insert(connection))
    }

    async fn write_connected(
        &self,
        slot: &mut Option<Connection>,
        remote_path: &str,
        content: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<u64, SftpError> {
        let connection = self.ensure_connected(slot).await?;
        let mut file = connection.sftp.create(remote_path).await?;

        let size = tokio::io::copy(content, &mut file)
            .await
            .map_err(|e| SftpError::StreamError {
                path: remote_path.into(),
                source: e,
            })?;
        file.shutdown().await.map_err(|e| SftpError::StreamError {
            path: remote_path.into(),
            source: e,
        })?;

        Ok(size)
    }
}

#[async_trait]
impl TransferSession for SftpTransferSession {
    fn target(&self) -> &RemoteTarget {
        &self.target
    }

    #[tracing::instrument(skip(self, content), fields(target = %self.target), ret)]
    async fn write_file(
        &self,
        remote_path: &str,
        mut content: Box<dyn AsyncRead + Send + Unpin>,
    ) -> Result<u64, TransferError> {
        let mut slot = self.connection.lock().await;

        let result = tokio::time::timeout(
            self.timeout,
            self.write_connected(&mut slot, remote_path, content.as_mut()),
        )
        .await;

        match result {
            Ok(Ok(size)) => Ok(size),
            Ok(Err(e)) => {
                *slot = None;
                Err(e.into())
            }
            Err(_) => {
                *slot = None;
                Err(TransferError::Timeout {
                    timeout: self.timeout,
                })
            }
        }
    }

    #[tracing::instrument(skip(self), fields(target = %self.target))]
    async fn health_check(&self) -> Result<(), TransferError> {
        let mut slot = self.connection.lock().await;

        let result = tokio::time::timeout(self.timeout, async {
            let connection = self.ensure_connected(&mut slot).await?;
            connection.sftp.canonicalize(".").await?;
            Ok::<_, SftpError>(())
        })
        .await;

        match result {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                *slot = None;
                Err(e.into())
            }
            Err(_) => {
                *slot = None;
                Err(TransferError::Timeout {
                    timeout: self.timeout,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ssh_config(key_path: std::path::PathBuf) -> SshConfig {
        SshConfig {
            key_path,
            key_passphrase: String::new(),
            strict_host_key_checking: false,
        }
    }

    #[test]
    fn missing_private_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id_ed25519");

        assert!(matches!(
            load_private_key(&ssh_config(path.clone())),
            Err(SftpError::KeyError { path: p, .. }) if p == path
        ));
    }

    #[test]
    fn invalid_private_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id_ed25519");
        std::fs::write(&path, "not a key").unwrap();

        assert!(load_private_key(&ssh_config(path)).is_err());
    }

    #[test]
    fn error_conversion() {
        let error: TransferError = SftpError::AuthenticationError {
            target: "deploy@web1:22".into(),
        }
        .into();
        assert!(matches!(error, TransferError::Connection { .. }));

        let error: TransferError = SftpError::StreamError {
            path: "/srv/a.txt".into(),
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken"),
        }
        .into();
        assert!(matches!(error, TransferError::Write { path, .. } if path == "/srv/a.txt"));
    }
}
