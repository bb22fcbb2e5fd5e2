use std::{io::Write, sync::Arc};

use clap::Parser;
use hookdeploy_config::{Config, RemoteTarget};
use hookdeploy_core::{CoreModule, WorkingCopyLocks};
use hookdeploy_transfer_interface::{MemoryTransferSession, TransferSession, WriteLog};
use hookdeploy_vcs_interface::MockVcsService;
use tempfile::TempDir;
use tokio::sync::RwLock;

use crate::{
    args::{Args, CommandExecutor},
    commands::CommandContext,
};

pub(crate) const WEBHOOK_SECRET: &str = "s3cr3t";

pub(crate) struct CommandContextTest {
    pub config: Config,
    pub core_module: CoreModule,
    pub vcs_service: MockVcsService,
    pub transfer_sessions: Vec<Box<dyn TransferSession>>,
    pub write_log: WriteLog,
    pub workdir: TempDir,
}

impl CommandContextTest {
    pub fn new() -> Self {
        let workdir = tempfile::tempdir().unwrap();

        let mut config = Config::default_no_version();
        config.server.webhook_secret = WEBHOOK_SECRET.into();
        config.git.workdir = workdir.path().to_path_buf();

        Self {
            config,
            core_module: CoreModule::builder().build(),
            vcs_service: MockVcsService::new(),
            transfer_sessions: vec![],
            write_log: WriteLog::default(),
            workdir,
        }
    }

    pub fn with_memory_targets(mut self, hosts: &[&str]) -> Self {
        for host in hosts {
            let target = RemoteTarget {
                host: (*host).into(),
                port: 22,
                user: "deploy".into(),
                folder: "/srv/www".into(),
            };

            self.config.transfer.targets.push(target.clone());
            self.transfer_sessions.push(Box::new(MemoryTransferSession::new(
                target,
                self.write_log.clone(),
            )));
        }

        self
    }

    // The temporary working directory stays owned by the test context.
    pub fn into_context(
        self,
        writer: Arc<RwLock<dyn Write + Send + Sync>>,
    ) -> (CommandContext, TempDir) {
        (
            CommandContext {
                config: self.config,
                core_module: self.core_module,
                vcs_service: Box::new(self.vcs_service),
                transfer_sessions: self.transfer_sessions,
                working_copy_locks: WorkingCopyLocks::new(),
                writer,
            },
            self.workdir,
        )
    }
}

pub(crate) async fn test_command(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let buf = Arc::new(RwLock::new(Vec::new()));

    {
        let command_args = {
            let mut tmp_args = vec!["hookdeploy"];
            tmp_args.extend(command_args);
            tmp_args
        };

        let args = Args::try_parse_from(command_args);
        match args {
            Ok(args) => {
                let (ctx, _workdir) = ctx.into_context(buf.clone());
                CommandExecutor::parse_args_async(args, ctx).await.unwrap()
            }
            Err(e) => {
                eprintln!("{}", e);
                panic!("Parse error.")
            }
        }
    }

    let vec = buf.read().await.to_vec();
    std::str::from_utf8(&vec).unwrap().to_string()
}
