use async_trait::async_trait;
use hookdeploy_models::WorkingCopy;
use hookdeploy_vcs_interface::{CloneStatus, VcsError};
use shaku::{Component, Interface};

use crate::{CoreContext, DeployError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait SynchronizeWorkingCopyInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        working_copy: &WorkingCopy,
        branch: &str,
        commit_id: &str,
    ) -> Result<CloneStatus>;
}

#[derive(Component)]
#[shaku(interface = SynchronizeWorkingCopyInterface)]
pub(crate) struct SynchronizeWorkingCopy;

#[async_trait]
impl SynchronizeWorkingCopyInterface for SynchronizeWorkingCopy {
    #[tracing::instrument(
        skip(self, ctx, working_copy),
        fields(
            clone_url = %working_copy.clone_url,
            dir = %working_copy.dir.display()
        ),
        ret
    )]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        working_copy: &WorkingCopy,
        branch: &str,
        commit_id: &str,
    ) -> Result<CloneStatus> {
        let sync_error = |e: VcsError| DeployError::Sync {
            clone_url: working_copy.clone_url.clone(),
            source: e,
        };

        let status = ctx
            .vcs_service
            .ensure_cloned(&working_copy.clone_url, branch, &working_copy.dir)
            .await
            .map_err(sync_error)?;

        if status == CloneStatus::AlreadyPresent {
            ctx.vcs_service
                .pull(&working_copy.dir, branch)
                .await
                .map_err(sync_error)?;
        }

        ctx.vcs_service
            .checkout(&working_copy.dir, commit_id)
            .await
            .map_err(sync_error)?;

        Ok(status)
    }
}
