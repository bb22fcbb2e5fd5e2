use std::{io::Write, path::PathBuf};

use async_trait::async_trait;
use clap::Parser;
use hookdeploy_crypto::Signature;

use super::{Command, CommandContext};
use crate::Result;

/// Compute the X-Hub-Signature header of a payload file
#[derive(Parser)]
pub(crate) struct SignCommand {
    /// Payload file
    #[arg(long)]
    file: PathBuf,
}

#[async_trait]
impl Command for SignCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let body = tokio::fs::read(self.file).await?;
        let signature = Signature::sign(&body, &ctx.config.server.webhook_secret)?;
        writeln!(ctx.writer.write().await, "{signature}")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use hookdeploy_crypto::Signature;
    use pretty_assertions::assert_eq;

    use crate::testutils::{test_command, CommandContextTest, WEBHOOK_SECRET};

    #[tokio::test]
    async fn sign_file() {
        let ctx = CommandContextTest::new();
        let payload = ctx.workdir.path().join("payload.json");
        std::fs::write(&payload, r#"{"zen": "Keep it logically awesome."}"#).unwrap();

        let expected = Signature::sign(
            br#"{"zen": "Keep it logically awesome."}"#,
            WEBHOOK_SECRET,
        )
        .unwrap();

        let output = test_command(ctx, &["utils", "sign", "--file", payload.to_str().unwrap()]).await;
        assert_eq!(output, format!("{expected}\n"));
    }
}
