//! Commands.

use std::{io::Write, sync::Arc};

use async_trait::async_trait;
use clap::Subcommand;
use hookdeploy_config::Config;
use hookdeploy_core::{CoreContext, CoreModule, WorkingCopyLocks};
use hookdeploy_transfer_interface::TransferSession;
use hookdeploy_vcs_interface::VcsService;
use tokio::sync::RwLock;

use self::{replay::ReplayCommand, server::ServerCommand, utils::UtilsCommand};
use crate::Result;

mod replay;
mod server;
mod utils;

pub(crate) struct CommandContext {
    pub config: Config,
    pub core_module: CoreModule,
    pub vcs_service: Box<dyn VcsService>,
    pub transfer_sessions: Vec<Box<dyn TransferSession>>,
    pub working_copy_locks: WorkingCopyLocks,
    pub writer: Arc<RwLock<dyn Write + Send + Sync>>,
}

impl CommandContext {
    pub fn as_core_context(&self) -> CoreContext {
        CoreContext {
            config: &self.config,
            core_module: &self.core_module,
            vcs_service: self.vcs_service.as_ref(),
            transfer_sessions: &self.transfer_sessions,
            working_copy_locks: &self.working_copy_locks,
        }
    }
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: CommandContext) -> Result<()>;
}

/// Command
#[derive(Subcommand)]
pub(crate) enum SubCommand {
    Server(ServerCommand),
    Replay(ReplayCommand),
    Utils(UtilsCommand),
}

impl SubCommand {
    /// Does the command copy files to remote targets?
    pub fn needs_remotes(&self) -> bool {
        matches!(self, Self::Server(_) | Self::Replay(_))
    }
}

#[async_trait]
impl Command for SubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Server(sub) => sub.execute(ctx).await,
            Self::Replay(sub) => sub.execute(ctx).await,
            Self::Utils(sub) => sub.execute(ctx).await,
        }
    }
}
