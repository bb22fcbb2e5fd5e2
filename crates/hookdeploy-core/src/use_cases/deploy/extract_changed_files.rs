use std::{
    collections::HashSet,
    path::{Component, Path, PathBuf},
};

use hookdeploy_models::HeadCommit;

/// Local paths of files added or modified by `head_commit`.
///
/// Added paths come first. Removed paths are ignored, and paths equal once
/// `.` components are dropped count as duplicates.
pub fn extract_changed_files(working_copy_dir: &Path, head_commit: &HeadCommit) -> Vec<PathBuf> {
    let mut seen = HashSet::new();

    head_commit
        .added
        .iter()
        .chain(head_commit.modified.iter())
        .map(|path| normalize(path))
        .filter(|path| !path.as_os_str().is_empty())
        .filter(|path| seen.insert(path.clone()))
        .map(|path| working_copy_dir.join(path))
        .collect()
}

fn normalize(path: &str) -> PathBuf {
    Path::new(path)
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn head_commit(added: &[&str], modified: &[&str], removed: &[&str]) -> HeadCommit {
        let owned = |paths: &[&str]| paths.iter().map(|&p| p.to_owned()).collect();
        HeadCommit {
            id: "abcd".into(),
            added: owned(added),
            modified: owned(modified),
            removed: owned(removed),
        }
    }

    #[test]
    fn added_then_modified() {
        let dir = Path::new("/work/me_test.git");
        let files = extract_changed_files(dir, &head_commit(&["a.txt"], &["b/c.txt"], &["d.txt"]));

        assert_eq!(
            files,
            vec![
                PathBuf::from("/work/me_test.git/a.txt"),
                PathBuf::from("/work/me_test.git/b/c.txt")
            ]
        );
    }

    #[test]
    fn duplicates() {
        let dir = Path::new("/work");
        let files = extract_changed_files(dir, &head_commit(&["a", "b"], &["b", "a", "c"], &[]));

        assert_eq!(
            files,
            vec![
                PathBuf::from("/work/a"),
                PathBuf::from("/work/b"),
                PathBuf::from("/work/c")
            ]
        );
    }

    #[test]
    fn duplicates_after_normalization() {
        let dir = Path::new("/work");
        let files = extract_changed_files(
            dir,
            &head_commit(&["./a.txt"], &["a.txt", "b/./c.txt", "b/c.txt"], &[]),
        );

        assert_eq!(
            files,
            vec![PathBuf::from("/work/a.txt"), PathBuf::from("/work/b/c.txt")]
        );
    }

    #[test]
    fn empty() {
        let files = extract_changed_files(Path::new("/work"), &head_commit(&[], &[], &["x"]));
        assert!(files.is_empty());
    }
}
