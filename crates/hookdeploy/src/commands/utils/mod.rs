//! Utils commands.

mod sign;

use async_trait::async_trait;
use clap::{Parser, Subcommand};

use self::sign::SignCommand;
use super::{Command, CommandContext};
use crate::Result;

/// Utils related commands
#[derive(Parser)]
pub(crate) struct UtilsCommand {
    #[clap(subcommand)]
    inner: UtilsSubCommand,
}

#[async_trait]
impl Command for UtilsCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
enum UtilsSubCommand {
    Sign(SignCommand),
}

#[async_trait]
impl Command for UtilsSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Sign(sub) => sub.execute(ctx).await,
        }
    }
}
