use hookdeploy_config::Config;
use hookdeploy_crypto::Signature;

use crate::{DeployError, Result};

/// Check the `X-Hub-Signature` header of a delivery against its raw body.
pub fn authenticate_delivery(config: &Config, signature: Option<&str>, body: &[u8]) -> Result<()> {
    let signature = signature.ok_or(DeployError::MissingSignature)?;

    if Signature::validate(Some(signature), body, &config.server.webhook_secret) {
        Ok(())
    } else {
        Err(DeployError::InvalidSignature)
    }
}
