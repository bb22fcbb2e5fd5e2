use std::{
    borrow::Cow,
    ffi::{OsStr, OsString},
    io::ErrorKind,
    path::Path,
    process::Stdio,
    time::Duration,
};

use async_trait::async_trait;
use hookdeploy_vcs_interface::{CloneStatus, VcsError, VcsService};
use tokio::process::Command;
use tracing::debug;

/// Git service running the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCliService {
    binary: String,
    timeout: Duration,
}

impl GitCliService {
    /// Creates a new git service.
    pub fn new<S: Into<String>>(binary: S, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    async fn run_git<I, S>(&self, args: I) -> Result<String, VcsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        let command = std::iter::once(Cow::Borrowed(self.binary.as_str()))
            .chain(args.iter().map(|a| a.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ");

        let mut cmd = Command::new(&self.binary);
        cmd.args(&args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .env("GIT_MERGE_AUTOEDIT", "no")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(command = %command, "spawning git");

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| VcsError::Timeout {
                command: command.clone(),
                timeout: self.timeout,
            })?
            .map_err(|e| VcsError::Io {
                command: command.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(VcsError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Arguments binding a command to the repository of `dir`.
///
/// Git never looks for a repository in parent directories, so a working copy
/// without `.git` fails instead of acting on an enclosing repository.
fn repository_args(dir: &Path) -> [&OsStr; 4] {
    [
        OsStr::new("-C"),
        dir.as_os_str(),
        OsStr::new("--git-dir=.git"),
        OsStr::new("--work-tree=."),
    ]
}

#[async_trait]
impl VcsService for GitCliService {
    #[tracing::instrument(skip(self), fields(dir = %dir.display()), ret)]
    async fn ensure_cloned(
        &self,
        clone_url: &str,
        branch: &str,
        dir: &Path,
    ) -> Result<CloneStatus, VcsError> {
        match tokio::fs::metadata(dir).await {
            Ok(meta) if meta.is_dir() => {
                return match tokio::fs::metadata(dir.join(".git")).await {
                    Ok(_) => Ok(CloneStatus::AlreadyPresent),
                    Err(e) if e.kind() == ErrorKind::NotFound => Err(VcsError::StateConflict {
                        path: dir.to_path_buf(),
                    }),
                    Err(e) => Err(VcsError::Io {
                        command: format!("stat {}", dir.join(".git").display()),
                        source: e,
                    }),
                };
            }
            Ok(_) => {
                return Err(VcsError::StateConflict {
                    path: dir.to_path_buf(),
                })
            }
            Err(e) if e.kind() == ErrorKind::NotFound => (),
            Err(e) => {
                return Err(VcsError::Io {
                    command: format!("stat {}", dir.display()),
                    source: e,
                })
            }
        }

        if let Some(parent) = dir.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| VcsError::Io {
                    command: format!("mkdir {}", parent.display()),
                    source: e,
                })?;
        }

        let branch_arg = format!("--branch={branch}");
        self.run_git([
            OsStr::new("clone"),
            OsStr::new(&branch_arg),
            OsStr::new("--"),
            OsStr::new(clone_url),
            dir.as_os_str(),
        ])
        .await?;

        Ok(CloneStatus::Cloned)
    }

    #[tracing::instrument(skip(self), fields(dir = %dir.display()))]
    async fn pull(&self, dir: &Path, branch: &str) -> Result<(), VcsError> {
        self.run_git(repository_args(dir).into_iter().chain([
            OsStr::new("pull"),
            OsStr::new("origin"),
            OsStr::new(branch),
        ]))
        .await
        .map(|_| ())
    }

    #[tracing::instrument(skip(self), fields(dir = %dir.display()))]
    async fn checkout(&self, dir: &Path, commit_id: &str) -> Result<(), VcsError> {
        self.run_git(repository_args(dir).into_iter().chain([
            OsStr::new("checkout"),
            OsStr::new("-f"),
            OsStr::new(commit_id),
            OsStr::new("--"),
        ]))
        .await
        .map(|_| ())
    }

    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> Result<(), VcsError> {
        self.run_git(["--version"]).await.map(|_| ())
    }
}
