use std::{io::Write, path::PathBuf};

use async_trait::async_trait;
use clap::Parser;
use hookdeploy_core::use_cases::deploy::{ProcessPushDeliveryInterface, PushDelivery};
use hookdeploy_crypto::Signature;
use shaku::HasComponent;

use super::{Command, CommandContext};
use crate::Result;

/// Deploy a push payload file, as if it was delivered by the webhook
#[derive(Parser)]
pub(crate) struct ReplayCommand {
    /// Push event payload (JSON)
    #[arg(long)]
    file: PathBuf,
}

#[async_trait]
impl Command for ReplayCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let body = tokio::fs::read(&self.file).await?;
        let signature = Signature::sign(&body, &ctx.config.server.webhook_secret)?;

        let core_ctx = ctx.as_core_context();
        let process_push_delivery: &dyn ProcessPushDeliveryInterface =
            core_ctx.core_module.resolve_ref();
        let report = process_push_delivery
            .run(
                &core_ctx,
                PushDelivery {
                    signature: Some(signature),
                    body,
                },
            )
            .await?;

        write!(ctx.writer.write().await, "{report}")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use hookdeploy_transfer_interface::RecordedWrite;
    use hookdeploy_vcs_interface::CloneStatus;
    use pretty_assertions::assert_eq;

    use crate::testutils::{test_command, CommandContextTest};

    const COMMIT_ID: &str = "0d1a26e67d8f5eaf1f6ba5c57fc3c7d91ac0fd1c";

    #[tokio::test]
    async fn replay_payload() {
        let mut ctx = CommandContextTest::new().with_memory_targets(&["web1", "web2"]);

        let dir = ctx.workdir.path().join("https_github.com_me_site.git");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<html></html>").unwrap();

        ctx.vcs_service
            .expect_ensure_cloned()
            .once()
            .return_once(|_, _, _| Ok(CloneStatus::Cloned));
        ctx.vcs_service
            .expect_checkout()
            .once()
            .withf(|_, commit_id| commit_id == COMMIT_ID)
            .return_once(|_, _| Ok(()));

        let payload = ctx.workdir.path().join("payload.json");
        std::fs::write(
            &payload,
            serde_json::json!({
                "ref": "refs/heads/main",
                "repository": {
                    "clone_url": "https://github.com/me/site.git",
                    "default_branch": "main"
                },
                "head_commit": {"id": COMMIT_ID, "added": ["index.html"]}
            })
            .to_string(),
        )
        .unwrap();

        let write_log = ctx.write_log.clone();
        let output = test_command(ctx, &["replay", "--file", payload.to_str().unwrap()]).await;

        assert_eq!(
            output,
            format!(
                "copied 1 file(s) to 2 remote(s) from https://github.com/me/site.git at {COMMIT_ID}\nindex.html\n"
            )
        );
        assert_eq!(
            write_log.lock().unwrap().clone(),
            vec![
                RecordedWrite {
                    host: "web1".into(),
                    remote_path: "/srv/www/index.html".into(),
                    content: b"<html></html>".to_vec(),
                },
                RecordedWrite {
                    host: "web2".into(),
                    remote_path: "/srv/www/index.html".into(),
                    content: b"<html></html>".to_vec(),
                },
            ]
        );
    }
}
