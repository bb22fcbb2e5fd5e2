//! Validation utilities.

use std::fmt::Write;

use hookdeploy_config::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

#[inline]
fn missing_var(error: &mut String, name: &str) {
    error.push('\n');
    let _ = write!(error, "  - Missing env. var.: {}", name);
}

#[inline]
fn invalid_var(error: &mut String, name: &str, reason: &str) {
    error.push('\n');
    let _ = write!(error, "  - Invalid env. var.: {} ({})", name, reason);
}

fn validate_env_vars(config: &Config, needs_remotes: bool) -> Result<(), ValidationError> {
    let mut error = String::new();

    // Check server configuration
    if config.server.bind_ip.is_empty() {
        missing_var(&mut error, "DEPLOY_SERVER_BIND_IP");
    }
    if config.server.bind_port == 0 {
        missing_var(&mut error, "DEPLOY_SERVER_BIND_PORT");
    }
    if config.server.webhook_secret.is_empty() {
        missing_var(&mut error, "DEPLOY_WEBHOOK_SECRET");
    }

    if needs_remotes {
        validate_remote_env_vars(config, &mut error);
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError { errors: error })
    }
}

fn validate_remote_env_vars(config: &Config, error: &mut String) {
    // Check git configuration
    if config.git.binary.is_empty() {
        missing_var(error, "DEPLOY_GIT_BINARY");
    }
    if config.git.timeout == 0 {
        invalid_var(error, "DEPLOY_GIT_TIMEOUT", "must be positive");
    }

    // Check SSH configuration
    if config.ssh.key_path.as_os_str().is_empty() {
        missing_var(error, "DEPLOY_SSH_KEY_PATH");
    } else if !config.ssh.key_path.is_file() {
        invalid_var(error, "DEPLOY_SSH_KEY_PATH", "file not found");
    }

    // Check remote targets
    if config.transfer.targets.is_empty() {
        missing_var(error, "DEPLOY_REMOTE_TARGETS");
    }
    for target in &config.transfer.targets {
        if target.user.is_empty() {
            invalid_var(
                error,
                "DEPLOY_REMOTE_USER",
                &format!("no user for target '{}'", target.host),
            );
        }
        if target.folder.is_empty() {
            invalid_var(
                error,
                "DEPLOY_REMOTE_FOLDER",
                &format!("no folder for target '{}'", target.host),
            );
        }
    }
    if config.transfer.timeout == 0 {
        invalid_var(error, "DEPLOY_TRANSFER_TIMEOUT", "must be positive");
    }
}

/// Validate configuration.
///
/// Git, SSH and remote target settings are only checked when `needs_remotes`.
pub fn validate_configuration(
    config: &Config,
    needs_remotes: bool,
) -> Result<(), ValidationError> {
    validate_env_vars(config, needs_remotes)
}

#[cfg(test)]
mod tests {
    use hookdeploy_config::RemoteTarget;
    use pretty_assertions::assert_eq;

    use super::*;

    fn valid_config(key_dir: &tempfile::TempDir) -> Config {
        let key_path = key_dir.path().join("id_ed25519");
        std::fs::write(&key_path, "key").unwrap();

        let mut config = Config::default_no_version();
        config.server.webhook_secret = "s3cr3t".into();
        config.ssh.key_path = key_path;
        config.transfer.targets = vec![RemoteTarget {
            host: "web1".into(),
            port: 22,
            user: "deploy".into(),
            folder: "/srv/www".into(),
        }];
        config
    }

    fn errors(config: &Config) -> String {
        match validate_configuration(config, true) {
            Err(ValidationError::EnvVarsError { errors }) => errors,
            Ok(()) => String::new(),
        }
    }

    #[test]
    fn valid_configuration() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_configuration(&valid_config(&dir), true).is_ok());
    }

    #[test]
    fn default_configuration() {
        assert_eq!(
            errors(&Config::default_no_version()),
            "\n  - Missing env. var.: DEPLOY_WEBHOOK_SECRET\
             \n  - Missing env. var.: DEPLOY_SSH_KEY_PATH\
             \n  - Missing env. var.: DEPLOY_REMOTE_TARGETS"
        );
    }

    #[test]
    fn incomplete_targets() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = valid_config(&dir);
        config.ssh.key_path = dir.path().join("missing");
        config.transfer.targets[0].user = String::new();
        config.transfer.targets[0].folder = String::new();

        assert_eq!(
            errors(&config),
            "\n  - Invalid env. var.: DEPLOY_SSH_KEY_PATH (file not found)\
             \n  - Invalid env. var.: DEPLOY_REMOTE_USER (no user for target 'web1')\
             \n  - Invalid env. var.: DEPLOY_REMOTE_FOLDER (no folder for target 'web1')"
        );
    }

    #[test]
    fn local_commands_only_need_the_secret() {
        let mut config = Config::default_no_version();
        assert!(matches!(
            validate_configuration(&config, false),
            Err(ValidationError::EnvVarsError { errors })
                if errors == "\n  - Missing env. var.: DEPLOY_WEBHOOK_SECRET"
        ));

        config.server.webhook_secret = "s3cr3t".into();
        assert!(validate_configuration(&config, false).is_ok());
    }
}
