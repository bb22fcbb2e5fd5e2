use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per working copy directory locks, created on first use.
#[derive(Default)]
pub struct WorkingCopyLocks {
    locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl WorkingCopyLocks {
    /// Creates an empty lock set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the lock of the working copy in `dir`.
    pub async fn acquire(&self, dir: &Path) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(dir.to_path_buf()).or_default().clone()
        };

        lock.lock_owned().await
    }
}
