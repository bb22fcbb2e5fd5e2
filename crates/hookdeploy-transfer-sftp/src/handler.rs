use async_trait::async_trait;
use russh::client;
use russh_keys::key::PublicKey;
use tracing::warn;

/// Client handler checking remote host keys.
pub(crate) struct HostKeyHandler {
    pub host: String,
    pub port: u16,
    pub strict: bool,
}

#[async_trait]
impl client::Handler for HostKeyHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> Result<bool, Self::Error> {
        if !self.strict {
            warn!(
                message = "Accepting host key without verification",
                host = %self.host,
                port = self.port
            );
            return Ok(true);
        }

        match russh_keys::check_known_hosts(&self.host, self.port, server_public_key) {
            Ok(true) => Ok(true),
            Ok(false) => {
                warn!(
                    message = "Unknown host key",
                    host = %self.host,
                    port = self.port
                );
                Ok(false)
            }
            Err(e) => {
                warn!(
                    message = "Host key check failed",
                    host = %self.host,
                    port = self.port,
                    error = %e
                );
                Ok(false)
            }
        }
    }
}
