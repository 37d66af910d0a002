// File System Port
// Directory enumeration and raw byte writes

use std::path::{Path, PathBuf};
use thiserror::Error;

/// File system errors
#[derive(Error, Debug)]
pub enum FsError {
    #[error("Cannot open directory {path}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// File System trait
///
/// Implementations:
/// - LocalFileSystem: std::fs backed
/// - RecordingFileSystem: in-memory, for tests
pub trait FileSystem: Send + Sync {
    /// Every regular file reachable from `root`, at any depth.
    ///
    /// Each path is the containing directory joined with the file name.
    /// Order follows the underlying directory enumeration and is not sorted.
    ///
    /// # Errors
    /// - FsError::DirectoryUnreadable if `root` (or a nested directory) cannot be opened
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>, FsError>;

    /// True if `path` can be opened as a directory
    fn folder_exists(&self, path: &Path) -> bool;

    /// Open `file` for writing (created and truncated), seek to `offset`, write `data`.
    ///
    /// The truncation means `offset` only positions data inside the fresh
    /// file; bytes before it read back as zeros.
    fn write_bytes(&self, file: &Path, offset: u64, data: &[u8]) -> Result<(), FsError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// In-memory file system: a fixed file listing plus captured writes
    #[derive(Clone, Default)]
    pub struct RecordingFileSystem {
        files: Arc<Mutex<Vec<PathBuf>>>,
        writes: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
    }

    impl RecordingFileSystem {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_files<I, P>(files: I) -> Self
        where
            I: IntoIterator<Item = P>,
            P: Into<PathBuf>,
        {
            let fs = Self::new();
            fs.files
                .lock()
                .unwrap()
                .extend(files.into_iter().map(Into::into));
            fs
        }

        /// Content of `file` as produced by `write_bytes`
        pub fn written(&self, file: &Path) -> Option<Vec<u8>> {
            self.writes.lock().unwrap().get(file).cloned()
        }
    }

    impl FileSystem for RecordingFileSystem {
        fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>, FsError> {
            if !self.folder_exists(root) {
                return Err(FsError::DirectoryUnreadable {
                    path: root.to_path_buf(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            }
            Ok(self
                .files
                .lock()
                .unwrap()
                .iter()
                .filter(|f| f.starts_with(root))
                .cloned()
                .collect())
        }

        fn folder_exists(&self, path: &Path) -> bool {
            self.files
                .lock()
                .unwrap()
                .iter()
                .any(|f| f.starts_with(path) && f.as_path() != path)
        }

        fn write_bytes(&self, file: &Path, offset: u64, data: &[u8]) -> Result<(), FsError> {
            let mut content = vec![0u8; offset as usize];
            content.extend_from_slice(data);
            self.writes
                .lock()
                .unwrap()
                .insert(file.to_path_buf(), content);
            Ok(())
        }
    }
}
