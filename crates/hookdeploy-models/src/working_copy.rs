use std::path::{Path, PathBuf};

use crate::ModelError;

/// Local directory bound to a clone URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingCopy {
    /// Repository clone URL.
    pub clone_url: String,
    /// Local directory.
    pub dir: PathBuf,
}

/// Longest directory name accepted by common file systems.
const MAX_NAME_LEN: usize = 255;

impl WorkingCopy {
    /// Resolve the working copy of `clone_url` under `root`.
    ///
    /// The directory name is built from the URL scheme, authority and path
    /// segments joined with `_`, each part percent-encoded outside of
    /// `[A-Za-z0-9.-]`. `https://github.com/owner/repo.git` lives in
    /// `<root>/https_github.com_owner_repo.git`, and distinct URLs never share
    /// a directory.
    pub fn for_clone_url(root: &Path, clone_url: &str) -> Result<Self, ModelError> {
        let name = directory_name(clone_url).ok_or_else(|| ModelError::InvalidCloneUrl {
            url: clone_url.into(),
        })?;

        Ok(Self {
            clone_url: clone_url.into(),
            dir: root.join(name),
        })
    }
}

/// Split a clone URL in scheme, authority and path.
///
/// scp-like URLs (`user@host:path`) have an empty scheme, local paths an
/// empty scheme and authority.
fn split_clone_url(clone_url: &str) -> Option<(&str, &str, &str)> {
    if let Some((scheme, rest)) = clone_url.split_once("://") {
        let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
        (!scheme.is_empty()).then_some((scheme, authority, path))
    } else if let Some(path) = clone_url.strip_prefix('/') {
        Some(("", "", path))
    } else {
        let (authority, path) = clone_url.split_once(':')?;
        (!authority.is_empty()).then_some(("", authority, path))
    }
}

fn escape_component(component: &str) -> String {
    let mut escaped = String::with_capacity(component.len());
    for byte in component.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'-' => escaped.push(byte as char),
            _ => escaped.push_str(&format!("%{byte:02X}")),
        }
    }
    escaped
}

fn directory_name(clone_url: &str) -> Option<String> {
    let (scheme, authority, path) = split_clone_url(clone_url)?;
    if path.split('/').all(str::is_empty) {
        return None;
    }

    // Escaped parts never contain `_`, so the join is reversible.
    let name = [scheme, authority]
        .into_iter()
        .chain(path.split('/'))
        .map(escape_component)
        .collect::<Vec<_>>()
        .join("_");

    (name.len() <= MAX_NAME_LEN).then_some(name)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn dir_of(url: &str) -> Option<PathBuf> {
        WorkingCopy::for_clone_url(Path::new("/work"), url)
            .ok()
            .map(|w| w.dir)
    }

    #[test]
    fn names_from_urls() {
        assert_eq!(
            dir_of("https://github.com/dictyBase/webhooks.git"),
            Some("/work/https_github.com_dictyBase_webhooks.git".into())
        );
        assert_eq!(
            dir_of("ssh://git@git.example.org:2222/team/site.git"),
            Some("/work/ssh_git%40git.example.org%3A2222_team_site.git".into())
        );
        assert_eq!(
            dir_of("git@github.com:owner/repo.git"),
            Some("/work/_git%40github.com_owner_repo.git".into())
        );
        assert_eq!(
            dir_of("/srv/git/my repo"),
            Some("/work/__srv_git_my%20repo".into())
        );
    }

    #[test]
    fn distinct_urls_do_not_collide() {
        let urls = [
            "https://github.com/a/site.git",
            "https://github.com/b/site.git",
            "https://gitlab.com/a/site.git",
            "http://github.com/a/site.git",
            "https://git.example.org/a_b/c.git",
            "https://git.example.org/a/b_c.git",
            "https://git.example.org/a%5Fb/c.git",
            "https://git.example.org/a/b/c.git",
            "https://git.example.org/a/b/c.git/",
            "git.example.org:a/b/c.git",
            "/git.example.org/a/b/c.git",
            "file:///git.example.org/a/b/c.git",
        ];

        let dirs: std::collections::HashSet<_> = urls.iter().map(|url| dir_of(url)).collect();
        assert_eq!(dirs.len(), urls.len());
        assert!(!dirs.contains(&None));
    }

    #[test]
    fn invalid_urls() {
        let too_long = format!("https://github.com/me/{}.git", "a".repeat(250));
        for url in [
            "",
            "repo",
            "https://github.com",
            "https://github.com/",
            "://github.com/me/site.git",
            ":me/site.git",
            "/",
            too_long.as_str(),
        ] {
            assert_eq!(
                WorkingCopy::for_clone_url(Path::new("/work"), url),
                Err(ModelError::InvalidCloneUrl { url: url.into() }),
                "url {url:?} should be rejected"
            );
        }
    }
}
