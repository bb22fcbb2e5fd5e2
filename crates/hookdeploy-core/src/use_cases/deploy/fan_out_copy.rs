use std::{
    io::{Error as IoError, ErrorKind},
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use shaku::{Component, Interface};
use tracing::debug;

use crate::{CoreContext, DeployError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait FanOutCopyInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        working_copy_dir: &Path,
        local_paths: Vec<PathBuf>,
    ) -> Result<()>;
}

#[derive(Component)]
#[shaku(interface = FanOutCopyInterface)]
pub(crate) struct FanOutCopy;

#[async_trait]
impl FanOutCopyInterface for FanOutCopy {
    #[tracing::instrument(
        skip_all,
        fields(
            working_copy_dir = %working_copy_dir.display(),
            file_count = local_paths.len(),
            target_count = ctx.transfer_sessions.len()
        )
    )]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        working_copy_dir: &Path,
        local_paths: Vec<PathBuf>,
    ) -> Result<()> {
        let sources = resolve_sources(working_copy_dir, local_paths).await?;

        for source in sources {
            for session in ctx.transfer_sessions {
                let file = tokio::fs::File::open(&source.resolved)
                    .await
                    .map_err(|e| DeployError::LocalRead {
                        path: source.path.clone(),
                        source: e,
                    })?;

                let remote_path = session.target().remote_path(&source.file_name);
                let size = session
                    .write_file(&remote_path, Box::new(file))
                    .await
                    .map_err(|e| DeployError::Copy {
                        path: source.path.clone(),
                        target: session.target().to_string(),
                        source: e,
                    })?;

                debug!(
                    message = "Copied file",
                    path = %source.path.display(),
                    target = %session.target(),
                    remote_path = %remote_path,
                    size = size
                );
            }
        }

        Ok(())
    }
}

struct SourceFile {
    path: PathBuf,
    resolved: PathBuf,
    file_name: String,
}

/// Checks every path before anything is written.
///
/// Each path must be a regular file, not a symbolic link, and must resolve
/// inside `working_copy_dir`.
async fn resolve_sources(
    working_copy_dir: &Path,
    local_paths: Vec<PathBuf>,
) -> Result<Vec<SourceFile>> {
    let root = tokio::fs::canonicalize(working_copy_dir)
        .await
        .map_err(|e| DeployError::LocalRead {
            path: working_copy_dir.to_path_buf(),
            source: e,
        })?;

    let mut sources = Vec::with_capacity(local_paths.len());
    for path in local_paths {
        let rejected = |reason: &str| DeployError::LocalRead {
            path: path.clone(),
            source: IoError::new(ErrorKind::InvalidInput, reason.to_string()),
        };

        let file_name = match path.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => return Err(rejected("path has no file name")),
        };

        let metadata = tokio::fs::symlink_metadata(&path)
            .await
            .map_err(|e| DeployError::LocalRead {
                path: path.clone(),
                source: e,
            })?;
        if !metadata.file_type().is_file() {
            return Err(rejected("not a regular file"));
        }

        let resolved = tokio::fs::canonicalize(&path)
            .await
            .map_err(|e| DeployError::LocalRead {
                path: path.clone(),
                source: e,
            })?;
        if !resolved.starts_with(&root) {
            return Err(rejected("outside of working copy"));
        }

        sources.push(SourceFile {
            path,
            resolved,
            file_name,
        });
    }

    Ok(sources)
}
