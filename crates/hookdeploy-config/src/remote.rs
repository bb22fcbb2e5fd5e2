use std::{fmt, str::FromStr};

use crate::ConfigError;

/// Default SSH port.
pub const DEFAULT_SSH_PORT: u16 = 22;

/// Remote host receiving deployed files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    /// Host name or IP address.
    pub host: String,
    /// SSH port.
    pub port: u16,
    /// SSH user.
    pub user: String,
    /// Remote base folder.
    pub folder: String,
}

impl RemoteTarget {
    /// Build the remote path of a file named `file_name` in the target folder.
    pub fn remote_path(&self, file_name: &str) -> String {
        let folder = self.folder.trim_end_matches('/');
        if folder.is_empty() {
            file_name.to_string()
        } else {
            format!("{folder}/{file_name}")
        }
    }
}

impl fmt::Display for RemoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.user, self.host, self.port)
    }
}

/// Remote target as written in configuration, before defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RemoteTargetEntry {
    host: String,
    port: u16,
    user: Option<String>,
    folder: Option<String>,
}

impl FromStr for RemoteTargetEntry {
    type Err = ConfigError;

    // Format: `[user@]host[:port][=folder]`, IPv6 hosts between brackets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ConfigError::InvalidRemoteTarget {
            entry: s.to_string(),
            reason: reason.to_string(),
        };

        let (address, folder) = match s.split_once('=') {
            Some((address, folder)) => (address, Some(folder.trim())),
            None => (s, None),
        };

        let (user, host_port) = match address.rsplit_once('@') {
            Some((user, rest)) => (Some(user.trim()), rest.trim()),
            None => (None, address.trim()),
        };

        if user == Some("") {
            return Err(invalid("empty user"));
        }

        let (host, port) = if let Some(bracketed) = host_port.strip_prefix('[') {
            let (host, rest) = bracketed
                .split_once(']')
                .ok_or_else(|| invalid("unterminated IPv6 address"))?;
            match rest {
                "" => (host, None),
                port => (
                    host,
                    Some(
                        port.strip_prefix(':')
                            .ok_or_else(|| invalid("unexpected characters after address"))?,
                    ),
                ),
            }
        } else {
            match host_port.split_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (host_port, None),
            }
        };

        if host.is_empty() {
            return Err(invalid("empty host"));
        }

        let port = match port {
            Some(port) => port.parse().map_err(|_| invalid("invalid port"))?,
            None => DEFAULT_SSH_PORT,
        };

        Ok(Self {
            host: host.to_string(),
            port,
            user: user.map(ToOwned::to_owned),
            folder: folder.filter(|f| !f.is_empty()).map(ToOwned::to_owned),
        })
    }
}

/// Parse a comma-separated list of remote targets.
///
/// Entries without user or folder get `default_user` and `default_folder`.
pub fn parse_remote_targets(
    value: &str,
    default_user: &str,
    default_folder: &str,
) -> Result<Vec<RemoteTarget>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let entry: RemoteTargetEntry = entry.parse()?;
            Ok(RemoteTarget {
                host: entry.host,
                port: entry.port,
                user: entry.user.unwrap_or_else(|| default_user.to_string()),
                folder: entry.folder.unwrap_or_else(|| default_folder.to_string()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_full_entries() {
        let targets = parse_remote_targets(
            "deploy@web1.example.org:2222=/var/www, web2.example.org",
            "www",
            "/srv/static",
        )
        .unwrap();

        assert_eq!(
            targets,
            vec![
                RemoteTarget {
                    host: "web1.example.org".into(),
                    port: 2222,
                    user: "deploy".into(),
                    folder: "/var/www".into(),
                },
                RemoteTarget {
                    host: "web2.example.org".into(),
                    port: DEFAULT_SSH_PORT,
                    user: "www".into(),
                    folder: "/srv/static".into(),
                }
            ]
        );
    }

    #[test]
    fn parse_ipv6_entry() {
        let targets = parse_remote_targets("root@[::1]:2022=/tmp", "", "").unwrap();
        assert_eq!(targets[0].host, "::1");
        assert_eq!(targets[0].port, 2022);
    }

    #[test]
    fn parse_empty_list() {
        assert_eq!(parse_remote_targets(" , ", "u", "f").unwrap(), vec![]);
    }

    #[test]
    fn parse_invalid_entries() {
        assert!(parse_remote_targets("host:port", "", "").is_err());
        assert!(parse_remote_targets("@host", "", "").is_err());
        assert!(parse_remote_targets("user@:22", "", "").is_err());
        assert!(parse_remote_targets("[::1", "", "").is_err());
    }

    #[test]
    fn remote_path() {
        let mut target = parse_remote_targets("h=/var/www/", "u", "").unwrap().remove(0);
        assert_eq!(target.remote_path("a.txt"), "/var/www/a.txt");

        target.folder = String::new();
        assert_eq!(target.remote_path("a.txt"), "a.txt");
    }

    #[test]
    fn display() {
        let target = parse_remote_targets("deploy@h:23", "", "").unwrap().remove(0);
        assert_eq!(target.to_string(), "deploy@h:23");
    }
}
