// Local file system implementation
// reason: std::fs directory iteration and positioned writes
use std::fs::{self, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use ccs_core::port::file_system::{FileSystem, FsError};

/// File system adapter over `std::fs`
///
/// Directory walks are depth-first. Entry kinds come from the directory
/// entry itself (symlinks are not followed), so a symlink pointing back up
/// the tree is skipped rather than recursed into.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }

    /// Walk `dir`, appending regular files to `files`.
    ///
    /// Subdirectories are visited with their joined path, so results stay
    /// correct regardless of the process working directory.
    fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), FsError> {
        let unreadable = |source: std::io::Error| FsError::DirectoryUnreadable {
            path: dir.to_path_buf(),
            source,
        };

        // The ReadDir handle is closed when it drops, on every exit path
        for entry in fs::read_dir(dir).map_err(unreadable)? {
            let entry = entry.map_err(unreadable)?;
            let file_type = entry.file_type().map_err(unreadable)?;
            let path = entry.path();

            if file_type.is_dir() {
                Self::walk(&path, files)?;
            } else if file_type.is_file() {
                files.push(path);
            } else {
                debug!(path = %path.display(), "Skipping non-regular entry");
            }
        }
        Ok(())
    }
}

impl FileSystem for LocalFileSystem {
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>, FsError> {
        let mut files = Vec::new();
        Self::walk(root, &mut files)?;

        info!(root = %root.display(), count = files.len(), "Directory listed");
        Ok(files)
    }

    fn folder_exists(&self, path: &Path) -> bool {
        fs::read_dir(path).is_ok()
    }

    fn write_bytes(&self, file: &Path, offset: u64, data: &[u8]) -> Result<(), FsError> {
        let failed = |source: std::io::Error| FsError::WriteFailed {
            path: file.to_path_buf(),
            source,
        };

        let mut handle = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(file)
            .map_err(failed)?;
        handle.seek(SeekFrom::Start(offset)).map_err(failed)?;
        handle.write_all(data).map_err(failed)?;
        handle.flush().map_err(failed)?;

        debug!(file = %file.display(), offset = offset, bytes = data.len(), "Bytes written");
        Ok(())
    }
}
