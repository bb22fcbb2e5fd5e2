//! Config module.

mod remote;

use std::{env, path::PathBuf, time::Duration};

pub use remote::{parse_remote_targets, RemoteTarget, DEFAULT_SSH_PORT};
use thiserror::Error;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid remote target '{entry}': {reason}")]
    InvalidRemoteTarget { entry: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind IP.
    pub bind_ip: String,
    /// Server bind port.
    pub bind_port: u16,
    /// Server workers count.
    pub workers_count: Option<u16>,
    /// Maximum webhook payload size (in bytes).
    pub max_payload_size: usize,
    /// Server webhook secret.
    pub webhook_secret: String,
}

#[derive(Debug, Clone)]
pub struct GitConfig {
    /// Root folder of working copies.
    pub workdir: PathBuf,
    /// Git executable.
    pub binary: String,
    /// Timeout of one git command (in seconds).
    pub timeout: u64,
}

impl GitConfig {
    /// Git command timeout as a duration.
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[derive(Debug, Clone)]
pub struct SshConfig {
    /// Private key path.
    pub key_path: PathBuf,
    /// Private key passphrase.
    pub key_passphrase: String,
    /// Check remote host keys against known hosts.
    pub strict_host_key_checking: bool,
}

#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// Remote targets.
    pub targets: Vec<RemoteTarget>,
    /// Timeout of one remote file write (in seconds).
    pub timeout: u64,
}

impl TransferConfig {
    /// Remote write timeout as a duration.
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[derive(Debug, Clone)]
pub struct SentryConfig {
    /// Sentry URL.
    pub url: String,
    /// Traces sample rate (between 0 and 1) for Sentry
    pub traces_sample_rate: f32,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Use bunyan logging.
    pub use_bunyan: bool,
}

/// Deployment configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server options.
    pub server: ServerConfig,
    /// Git options.
    pub git: GitConfig,
    /// SSH options.
    pub ssh: SshConfig,
    /// Transfer options.
    pub transfer: TransferConfig,
    /// Logging options.
    pub logging: LoggingConfig,
    /// Sentry options.
    pub sentry: SentryConfig,
    /// App version
    pub version: String,
}

impl Config {
    /// Create configuration from environment.
    pub fn from_env(version: String) -> Result<Config, ConfigError> {
        let targets = parse_remote_targets(
            &env_to_str("DEPLOY_REMOTE_TARGETS", ""),
            &env_to_str("DEPLOY_REMOTE_USER", ""),
            &env_to_str("DEPLOY_REMOTE_FOLDER", ""),
        )?;

        Ok(Config {
            server: ServerConfig {
                bind_ip: env_to_str("DEPLOY_SERVER_BIND_IP", "127.0.0.1"),
                bind_port: env_to_u16("DEPLOY_SERVER_BIND_PORT", 8008),
                workers_count: env_to_optional_u16("DEPLOY_SERVER_WORKERS_COUNT", None),
                max_payload_size: env_to_usize("DEPLOY_SERVER_MAX_PAYLOAD_SIZE", 25 * 1024 * 1024),
                webhook_secret: env_to_str("DEPLOY_WEBHOOK_SECRET", ""),
            },
            git: GitConfig {
                workdir: env_to_str("DEPLOY_WORKDIR", "./working-copies").into(),
                binary: env_to_str("DEPLOY_GIT_BINARY", "git"),
                timeout: env_to_u64("DEPLOY_GIT_TIMEOUT", 300),
            },
            ssh: SshConfig {
                key_path: env_to_str("DEPLOY_SSH_KEY_PATH", "").into(),
                key_passphrase: env_to_str("DEPLOY_SSH_KEY_PASSPHRASE", ""),
                strict_host_key_checking: env_to_bool("DEPLOY_SSH_STRICT_HOST_KEY_CHECKING", false),
            },
            transfer: TransferConfig {
                targets,
                timeout: env_to_u64("DEPLOY_TRANSFER_TIMEOUT", 60),
            },
            logging: LoggingConfig {
                use_bunyan: env_to_bool("DEPLOY_LOGGING_USE_BUNYAN", false),
            },
            sentry: SentryConfig {
                url: env_to_str("DEPLOY_SENTRY_URL", ""),
                traces_sample_rate: env_to_f32("DEPLOY_SENTRY_TRACES_SAMPLE_RATE", 0.0),
            },
            version,
        })
    }

    /// Configuration with default values, ignoring the environment.
    pub fn default_no_version() -> Self {
        Config {
            server: ServerConfig {
                bind_ip: "127.0.0.1".into(),
                bind_port: 8008,
                workers_count: None,
                max_payload_size: 25 * 1024 * 1024,
                webhook_secret: String::new(),
            },
            git: GitConfig {
                workdir: "./working-copies".into(),
                binary: "git".into(),
                timeout: 300,
            },
            ssh: SshConfig {
                key_path: PathBuf::new(),
                key_passphrase: String::new(),
                strict_host_key_checking: false,
            },
            transfer: TransferConfig {
                targets: vec![],
                timeout: 60,
            },
            logging: LoggingConfig { use_bunyan: false },
            sentry: SentryConfig {
                url: String::new(),
                traces_sample_rate: 0.0,
            },
            version: "0.0.0".into(),
        }
    }
}

fn env_to_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_optional_u16(name: &str, default: Option<u16>) -> Option<u16> {
    env::var(name)
        .map(|e| e.parse::<u16>().map(Some).unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_f32(name: &str, default: f32) -> f32 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_bool(name: &str, default: bool) -> bool {
    env::var(name).map(|e| !e.is_empty()).unwrap_or(default)
}

fn env_to_str(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_e| default.to_string())
}
