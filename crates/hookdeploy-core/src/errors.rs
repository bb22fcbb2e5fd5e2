//! Deployment errors.

use std::path::PathBuf;

use hookdeploy_models::ModelError;
use hookdeploy_transfer_interface::TransferError;
use hookdeploy_vcs_interface::VcsError;
use thiserror::Error;

/// Deployment error, naming the failing step.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Missing webhook signature")]
    MissingSignature,

    #[error("Invalid webhook signature")]
    InvalidSignature,

    /// Wraps [`serde_json::Error`].
    #[error("Could not decode push payload: {source}")]
    Decode { source: serde_json::Error },

    /// Wraps [`ModelError`].
    #[error("Invalid push notification: {source}")]
    InvalidNotification { source: ModelError },

    /// Wraps [`VcsError`].
    #[error("Could not synchronize working copy of '{clone_url}': {source}")]
    Sync { clone_url: String, source: VcsError },

    #[error("Could not read local file '{}': {source}", path.display())]
    LocalRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Wraps [`TransferError`].
    #[error("Could not copy '{}' to {target}: {source}", path.display())]
    Copy {
        path: PathBuf,
        target: String,
        source: TransferError,
    },
}

impl DeployError {
    /// Is the error caused by the webhook authentication?
    pub fn is_authentication_error(&self) -> bool {
        matches!(self, Self::MissingSignature | Self::InvalidSignature)
    }
}

impl From<serde_json::Error> for DeployError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode { source: e }
    }
}

impl From<ModelError> for DeployError {
    fn from(e: ModelError) -> Self {
        Self::InvalidNotification { source: e }
    }
}

/// Result alias for `DeployError`.
pub type Result<T> = core::result::Result<T, DeployError>;
