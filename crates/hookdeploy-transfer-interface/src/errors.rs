use std::time::Duration;

use thiserror::Error;

/// Transfer error.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum TransferError {
    /// Remote operation did not finish in time.
    #[error("Transfer timed out after {}s", timeout.as_secs())]
    Timeout { timeout: Duration },

    /// Session could not be (re)established.
    #[error("Could not connect to remote: {message}")]
    Connection { message: String },

    /// Remote file could not be written.
    #[error("Could not write remote file '{path}'")]
    Write {
        path: String,
        source: std::io::Error,
    },

    /// Implementation-specific error
    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}
