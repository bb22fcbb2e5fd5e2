use std::{fmt, path::PathBuf};

use async_trait::async_trait;
use hookdeploy_models::{types::GhPushEvent, PushNotification, WorkingCopy};
use hookdeploy_vcs_interface::CloneStatus;
use shaku::{Component, HasComponent, Interface};
use tracing::info;

use crate::{
    use_cases::deploy::{
        authenticate_delivery, extract_changed_files, FanOutCopyInterface,
        SynchronizeWorkingCopyInterface,
    },
    CoreContext, Result,
};

/// Raw webhook delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushDelivery {
    /// `X-Hub-Signature` header value.
    pub signature: Option<String>,
    /// Unparsed request body.
    pub body: Vec<u8>,
}

/// Successful deployment summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentReport {
    /// Repository clone URL.
    pub clone_url: String,
    /// Synchronized commit.
    pub commit_id: String,
    /// Working copy action.
    pub clone_status: CloneStatus,
    /// Working copy directory.
    pub working_copy_dir: PathBuf,
    /// Copied local files.
    pub copied_files: Vec<PathBuf>,
    /// Number of remote targets.
    pub target_count: usize,
}

impl DeploymentReport {
    /// Copied files, relative to the working copy.
    pub fn relative_files(&self) -> Vec<String> {
        self.copied_files
            .iter()
            .map(|path| {
                path.strip_prefix(&self.working_copy_dir)
                    .unwrap_or(path)
                    .display()
                    .to_string()
            })
            .collect()
    }
}

impl fmt::Display for DeploymentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "copied {} file(s) to {} remote(s) from {} at {}",
            self.copied_files.len(),
            self.target_count,
            self.clone_url,
            self.commit_id
        )?;

        for file in self.relative_files() {
            writeln!(f, "{file}")?;
        }

        Ok(())
    }
}

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ProcessPushDeliveryInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        delivery: PushDelivery,
    ) -> Result<DeploymentReport>;
}

#[derive(Component)]
#[shaku(interface = ProcessPushDeliveryInterface)]
pub(crate) struct ProcessPushDelivery;

#[async_trait]
impl ProcessPushDeliveryInterface for ProcessPushDelivery {
    #[tracing::instrument(skip_all, fields(body_size = delivery.body.len()))]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        delivery: PushDelivery,
    ) -> Result<DeploymentReport> {
        authenticate_delivery(ctx.config, delivery.signature.as_deref(), &delivery.body)?;

        let event: GhPushEvent = serde_json::from_slice(&delivery.body)?;
        let notification = PushNotification::try_from(event)?;
        let working_copy =
            WorkingCopy::for_clone_url(&ctx.config.git.workdir, &notification.clone_url)?;

        let _guard = ctx.working_copy_locks.acquire(&working_copy.dir).await;

        let synchronize: &dyn SynchronizeWorkingCopyInterface = ctx.core_module.resolve_ref();
        let clone_status = synchronize
            .run(
                ctx,
                &working_copy,
                &notification.default_branch,
                &notification.head_commit.id,
            )
            .await?;

        let copied_files = extract_changed_files(&working_copy.dir, &notification.head_commit);

        let fan_out: &dyn FanOutCopyInterface = ctx.core_module.resolve_ref();
        fan_out
            .run(ctx, &working_copy.dir, copied_files.clone())
            .await?;

        info!(
            message = "Deployment done",
            clone_url = %notification.clone_url,
            commit_id = %notification.head_commit.id,
            clone_status = ?clone_status,
            file_count = copied_files.len(),
            target_count = ctx.transfer_sessions.len()
        );

        Ok(DeploymentReport {
            clone_url: notification.clone_url,
            commit_id: notification.head_commit.id,
            clone_status,
            working_copy_dir: working_copy.dir,
            copied_files,
            target_count: ctx.transfer_sessions.len(),
        })
    }
}
