use std::path::PathBuf;

use hookdeploy_transfer_interface::TransferError;

/// SFTP error.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum SftpError {
    #[error("Could not load private key '{}'", path.display())]
    KeyError {
        path: PathBuf,
        source: russh_keys::Error,
    },

    #[error(transparent)]
    SshError { source: russh::Error },

    #[error("Public key authentication rejected by {target}")]
    AuthenticationError { target: String },

    #[error(transparent)]
    ProtocolError {
        source: russh_sftp::client::error::Error,
    },

    #[error("Could not stream content to '{path}'")]
    StreamError {
        path: String,
        source: std::io::Error,
    },
}

impl From<russh::Error> for SftpError {
    fn from(e: russh::Error) -> Self {
        SftpError::SshError { source: e }
    }
}

impl From<russh_sftp::client::error::Error> for SftpError {
    fn from(e: russh_sftp::client::error::Error) -> Self {
        SftpError::ProtocolError { source: e }
    }
}

impl From<SftpError> for TransferError {
    fn from(e: SftpError) -> Self {
        match e {
            SftpError::StreamError { path, source } => TransferError::Write { path, source },
            e @ (SftpError::SshError { .. } | SftpError::AuthenticationError { .. }) => {
                TransferError::Connection {
                    message: e.to_string(),
                }
            }
            e => TransferError::ImplementationError { source: e.into() },
        }
    }
}
