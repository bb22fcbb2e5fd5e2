use std::{path::PathBuf, time::Duration};

use thiserror::Error;

/// VCS error.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum VcsError {
    /// Working copy path exists but is not a directory.
    #[error("Working copy path '{}' exists but is not a directory", path.display())]
    StateConflict { path: PathBuf },

    /// Command exited with a failure status.
    #[error("Command '{command}' failed with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// Command did not finish in time.
    #[error("Command '{command}' timed out after {}s", timeout.as_secs())]
    Timeout { command: String, timeout: Duration },

    /// Command could not be spawned.
    #[error("Could not run command '{command}'")]
    Io {
        command: String,
        source: std::io::Error,
    },
}
