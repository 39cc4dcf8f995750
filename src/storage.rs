use std::path::{Path, PathBuf};

/// Finds the removable storage that carries the books.
pub trait StorageProvider {
    /// Root directory of the mounted storage, `None` when absent.
    fn locate(&self) -> Option<PathBuf>;
}

/// Picks the first already-mounted candidate directory holding the
/// catalog file. Mounting is left to the OS (fstab / udisks).
#[derive(Debug, Clone)]
pub struct MountedStorage {
    candidates: Vec<PathBuf>,
    config_file: String,
}

impl MountedStorage {
    pub fn new(candidates: Vec<PathBuf>, config_file: impl Into<String>) -> Self {
        Self {
            candidates,
            config_file: config_file.into(),
        }
    }

    pub fn config_path(&self, root: &Path) -> PathBuf {
        root.join(&self.config_file)
    }
}

impl StorageProvider for MountedStorage {
    fn locate(&self) -> Option<PathBuf> {
        for root in &self.candidates {
            let config = self.config_path(root);
            if config.is_file() {
                tracing::info!(root = %root.display(), "storage detected");
                return Some(root.clone());
            }
            tracing::debug!(root = %root.display(), "no catalog at candidate root");
        }
        tracing::warn!(candidates = self.candidates.len(), "no storage with catalog found");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn first_root_with_catalog_wins() {
        let empty = tempfile::tempdir().expect("tempdir");
        let usb = tempfile::tempdir().expect("tempdir");
        fs::write(usb.path().join("config.ini"), "[BOOKS]\nCount = 0\n").expect("write");

        let storage = MountedStorage::new(
            vec![
                PathBuf::from("/nonexistent/bookreader"),
                empty.path().to_path_buf(),
                usb.path().to_path_buf(),
            ],
            "config.ini",
        );
        assert_eq!(storage.locate(), Some(usb.path().to_path_buf()));
    }

    #[test]
    fn absent_storage() {
        let empty = tempfile::tempdir().expect("tempdir");
        let storage = MountedStorage::new(vec![empty.path().to_path_buf()], "config.ini");
        assert_eq!(storage.locate(), None);
    }
}
