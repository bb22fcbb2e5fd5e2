use std::sync::Arc;

use clap::Parser;
use hookdeploy_config::Config;
use hookdeploy_core::{CoreModule, WorkingCopyLocks};
use hookdeploy_sentry::with_sentry_configuration;
use hookdeploy_server::vcs::MetricsVcsService;
use hookdeploy_transfer_interface::TransferSession;
use hookdeploy_transfer_sftp::connect_all;
use hookdeploy_vcs_interface::VcsService;
use tokio::sync::RwLock;
use tracing::info;

use crate::{
    commands::{Command, CommandContext, SubCommand},
    Result,
};

#[derive(Parser)]
#[command(about = None, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    cmd: SubCommand,
}

impl Args {
    /// Does the command copy files to remote targets?
    pub fn needs_remotes(&self) -> bool {
        self.cmd.needs_remotes()
    }
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub fn parse_args(config: Config, args: Args) -> Result<()> {
        let sync = |config: Config, args: Args| async move {
            let core_module = CoreModule::builder().build();
            let vcs_service: Box<dyn VcsService> = Box::new(MetricsVcsService::new(&config));

            let transfer_sessions: Vec<Box<dyn TransferSession>> = if args.cmd.needs_remotes() {
                info!(
                    message = "Connecting to remote targets",
                    count = config.transfer.targets.len()
                );

                connect_all(&config)
                    .await?
                    .into_iter()
                    .map(|s| Box::new(s) as Box<dyn TransferSession>)
                    .collect()
            } else {
                vec![]
            };

            let ctx = CommandContext {
                config: config.clone(),
                core_module,
                vcs_service,
                transfer_sessions,
                working_copy_locks: WorkingCopyLocks::new(),
                writer: Arc::new(RwLock::new(std::io::stdout())),
            };

            with_sentry_configuration(&config.clone(), || async {
                Self::parse_args_async(args, ctx).await
            })
            .await
        };

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        actix_rt::System::with_tokio_rt(move || runtime).block_on(sync(config, args))?;

        Ok(())
    }

    pub(crate) async fn parse_args_async(args: Args, ctx: CommandContext) -> Result<()> {
        args.cmd.execute(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("hookdeploy").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn remotes_per_command() {
        assert!(parse(&["server"]).needs_remotes());
        assert!(parse(&["replay", "--file", "push.json"]).needs_remotes());
        assert!(!parse(&["utils", "sign", "--file", "push.json"]).needs_remotes());
    }
}
